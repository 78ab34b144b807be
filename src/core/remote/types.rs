//! Wire types for the Actions secrets API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The repository's current sealing key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKey {
    /// Base64-encoded X25519 public key.
    pub key: String,
    /// Identifier sent back with every sealed value.
    pub key_id: String,
}

/// Metadata for one remote secret. The value is never returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretBrief {
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `GET .../actions/secrets`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecretList {
    pub total_count: u64,
    pub secrets: Vec<SecretBrief>,
}

/// Body of `PUT .../actions/secrets/{name}`.
#[derive(Debug, Serialize)]
pub struct PutSecretRequest<'a> {
    pub encrypted_value: &'a str,
    pub key_id: &'a str,
}
