//! Sealed-box encryption.
//!
//! GitHub expects secret values sealed to the repository's X25519 public key
//! with libsodium's `crypto_box_seal`: an ephemeral keypair per message,
//! XSalsa20-Poly1305, no sender authentication. The recipient learns only
//! that the ciphertext was sealed to its key.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use crypto_box::aead::OsRng;
use crypto_box::{PublicKey, SecretKey, KEY_SIZE};
use tracing::trace;

use crate::error::{CipherError, Result};

/// A recipient public key decoded from its base64 form.
#[derive(Clone)]
pub struct SealingKey(PublicKey);

impl SealingKey {
    /// Decode a base64 X25519 public key as returned by the public-key
    /// endpoint.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::InvalidPublicKey` if the input is not base64 or
    /// does not decode to exactly 32 bytes.
    pub fn from_base64(encoded: &str) -> Result<Self> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| CipherError::InvalidPublicKey(format!("invalid base64: {}", e)))?;

        let bytes: [u8; KEY_SIZE] = bytes.as_slice().try_into().map_err(|_| {
            CipherError::InvalidPublicKey(format!(
                "expected {} bytes, got {}",
                KEY_SIZE,
                bytes.len()
            ))
        })?;

        Ok(Self(PublicKey::from(bytes)))
    }

    /// Seal `plaintext` and return the base64-encoded ciphertext.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::EncryptionFailed` if sealing fails.
    pub fn seal(&self, plaintext: &str) -> Result<String> {
        trace!(plaintext_len = plaintext.len(), "sealing");

        let sealed = self
            .0
            .seal(&mut OsRng, plaintext.as_bytes())
            .map_err(|e| CipherError::EncryptionFailed(e.to_string()))?;

        trace!(ciphertext_len = sealed.len(), "sealed");
        Ok(STANDARD.encode(sealed))
    }

    /// The key in base64, as the remote would publish it.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.0.as_bytes())
    }
}

impl From<PublicKey> for SealingKey {
    fn from(key: PublicKey) -> Self {
        Self(key)
    }
}

impl std::fmt::Debug for SealingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SealingKey").field(&self.to_base64()).finish()
    }
}

/// Open a base64 sealed box with the recipient's secret key.
///
/// Only the remote ever needs this; it exists so the sealing contract can be
/// checked end to end.
///
/// # Errors
///
/// Returns `CipherError::DecryptionFailed` on bad base64, a wrong key, a
/// tampered ciphertext or non-UTF-8 plaintext.
pub fn open(secret: &SecretKey, sealed_b64: &str) -> Result<String> {
    let sealed = STANDARD
        .decode(sealed_b64)
        .map_err(|e| CipherError::DecryptionFailed(format!("invalid base64: {}", e)))?;

    let plaintext = secret
        .unseal(&sealed)
        .map_err(|e| CipherError::DecryptionFailed(e.to_string()))?;

    String::from_utf8(plaintext)
        .map_err(|e| CipherError::DecryptionFailed(format!("UTF-8 error: {}", e)).into())
}
