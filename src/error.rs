//! Error types for ghsync.
//!
//! A top-level [`Error`] wraps one enum per domain so callers can match on
//! the layer that failed without string inspection.

use std::path::PathBuf;

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Env(#[from] EnvError),

    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// The remote API answered with a status the operation does not accept.
///
/// Transient (5xx) and permanent (4xx) failures are not distinguished.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{operation} failed: HTTP {status}: {body}")]
pub struct RemoteError {
    /// What was being attempted, e.g. `put secret API_KEY`.
    pub operation: String,
    /// HTTP status code returned by the remote.
    pub status: u16,
    /// Raw response body, kept for diagnostics.
    pub body: String,
}

impl RemoteError {
    pub fn new(operation: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            status,
            body: body.into(),
        }
    }
}

/// Sealing failures.
#[derive(Error, Debug)]
pub enum CipherError {
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("decryption failed: {0}")]
    DecryptionFailed(String),
}

/// Configuration and input resolution failures.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("no target repository: pass --repo owner/name or set GHSYNC_REPO")]
    MissingRepo,

    #[error("no GitHub token: pass --token or set GITHUB_TOKEN")]
    MissingToken,

    #[error("invalid repository '{0}': expected owner/name")]
    InvalidRepo(String),

    #[error("invalid API URL '{0}'")]
    InvalidApiUrl(String),

    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Local secret file failures.
#[derive(Error, Debug)]
pub enum EnvError {
    #[error("failed to read secret file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
