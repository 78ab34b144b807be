//! Remote secret store.
//!
//! [`SecretStore`] is the seam between the reconciler and whatever holds the
//! secrets. [`GithubClient`] is the real implementation; tests use an
//! in-memory one.
//!
//! ## Adding a New Store
//!
//! 1. Implement the `SecretStore` trait
//! 2. Seal values inside `put_secret`; plaintext must not leave the process
//! 3. Re-export from this module

mod github;
mod types;

pub use github::GithubClient;
pub use types::{PublicKey, PutSecretRequest, SecretBrief, SecretList};

use std::fmt;
use std::str::FromStr;

use crate::error::{ConfigError, Error, Result};

/// A write-only secret store.
pub trait SecretStore {
    /// The key values are sealed to. Memoized after the first success.
    fn public_key(&mut self) -> Result<PublicKey>;

    /// Metadata for every existing secret, in the store's order.
    fn list_secrets(&mut self) -> Result<Vec<SecretBrief>>;

    /// Create or overwrite a secret.
    fn put_secret(&mut self, name: &str, plaintext: &str) -> Result<()>;

    /// Delete a secret. Deleting a missing name is an error.
    fn delete_secret(&mut self, name: &str) -> Result<()>;
}

/// An `owner/name` repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub owner: String,
    pub repo: String,
}

impl Target {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }
}

impl FromStr for Target {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || ConfigError::InvalidRepo(s.to_string());

        let (owner, repo) = s.trim().split_once('/').ok_or_else(invalid)?;
        if owner.is_empty() || repo.is_empty() || repo.contains('/') {
            return Err(invalid().into());
        }

        Ok(Self::new(owner, repo))
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}
