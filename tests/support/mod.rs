//! Test support utilities for ghsync integration tests.
//!
//! Provides a mock GitHub secrets API and an isolated CLI environment.

#![allow(dead_code)]

pub mod assertions;
pub mod github;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use github::*;

use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// CLI test environment with an isolated working directory.
///
/// Child processes use `.current_dir()` and a scrubbed environment, so tests
/// can run in parallel and never pick up a real token.
pub struct Test {
    pub dir: TempDir,
}

impl Test {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    /// Create a test environment with a secret file in place.
    pub fn with_env_file(contents: &str) -> Self {
        let t = Self::new();
        t.write(".env", contents);
        t
    }

    /// Write a file into the working directory.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).expect("failed to write test file");
        path
    }

    /// A ghsync command with no inherited GitHub settings.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("ghsync").expect("failed to find ghsync binary");
        cmd.current_dir(self.dir.path())
            .env_remove("GITHUB_TOKEN")
            .env_remove("GHSYNC_REPO")
            .env_remove("GHSYNC_API_URL")
            .env_remove("GHSYNC_LOG")
            .env("NO_COLOR", "1");
        cmd
    }

    /// A ghsync command pointed at a mock API.
    pub fn cmd_against(&self, api_url: &str) -> Command {
        let mut cmd = self.cmd();
        cmd.env("GITHUB_TOKEN", TOKEN)
            .env("GHSYNC_REPO", format!("{}/{}", OWNER, REPO))
            .env("GHSYNC_API_URL", api_url);
        cmd
    }
}

/// Run blocking client code off the async test runtime.
pub async fn blocking<T, F>(f: F) -> T
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .expect("blocking task panicked")
}
