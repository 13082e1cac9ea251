//! AES-256-GCM authenticated encryption of single values
//!
//! Every call draws a fresh 12-byte IV from the injected random source;
//! the 16-byte GCM tag stays appended to the ciphertext, so a blob
//! verifies or fails as a unit. Ciphertext and IV travel as hex.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use serde::{Deserialize, Serialize};

use crate::crypto::key_derivation::DerivedKey;
use crate::crypto::random::RandomSource;
use crate::error::{Result, VaultError};

/// AES-GCM standard nonce length
const IV_LEN: usize = 12;
/// GCM authentication tag length
const TAG_LEN: usize = 16;

/// A single encrypted value and the nonce it was sealed under
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedBlob {
    /// Hex ciphertext with the GCM tag appended
    pub ciphertext: String,
    /// Hex 12-byte nonce, unique per encryption call
    pub iv: String,
}

impl EncryptedBlob {
    /// Decrypt this blob back to the original plaintext
    pub fn decrypt(&self, key: &DerivedKey) -> Result<String> {
        decrypt(&self.ciphertext, &self.iv, key)
    }
}

/// Encrypt a plaintext value under the derived key
///
/// Empty and whitespace-only plaintext is rejected before any
/// cryptographic work: "no value" is expressed by omitting the field,
/// never by encrypting an empty string.
pub fn encrypt(
    plaintext: &str,
    key: &DerivedKey,
    rng: &mut dyn RandomSource,
) -> Result<EncryptedBlob> {
    if plaintext.trim().is_empty() {
        return Err(VaultError::EmptyPlaintext);
    }

    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| VaultError::EncryptionError(e.to_string()))?;

    let mut iv = [0u8; IV_LEN];
    rng.fill_bytes(&mut iv);
    let nonce = Nonce::from_slice(&iv);

    let ciphertext = cipher
        .encrypt(nonce, plaintext.as_bytes())
        .map_err(|e| VaultError::EncryptionError(e.to_string()))?;

    Ok(EncryptedBlob {
        ciphertext: hex::encode(ciphertext),
        iv: hex::encode(iv),
    })
}

/// Decrypt a ciphertext/iv pair back to the original plaintext
///
/// Fails closed: a wrong key, a flipped ciphertext or IV byte, or a
/// substituted IV all surface as [`VaultError::DecryptionFailed`].
/// Malformed inputs (empty, non-hex, wrong IV length) are rejected
/// before the cipher runs.
pub fn decrypt(ciphertext: &str, iv: &str, key: &DerivedKey) -> Result<String> {
    if ciphertext.is_empty() || iv.is_empty() {
        return Err(VaultError::MalformedBlob(
            "ciphertext and iv are both required".to_string(),
        ));
    }

    let ciphertext = hex::decode(ciphertext)
        .map_err(|e| VaultError::MalformedBlob(format!("invalid ciphertext hex: {}", e)))?;
    let iv = hex::decode(iv)
        .map_err(|e| VaultError::MalformedBlob(format!("invalid iv hex: {}", e)))?;

    if iv.len() != IV_LEN {
        return Err(VaultError::MalformedBlob(format!(
            "invalid iv length: expected {}, got {}",
            IV_LEN,
            iv.len()
        )));
    }
    if ciphertext.len() < TAG_LEN {
        return Err(VaultError::MalformedBlob(
            "ciphertext shorter than the authentication tag".to_string(),
        ));
    }

    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| VaultError::EncryptionError(e.to_string()))?;

    let plaintext = cipher
        .decrypt(Nonce::from_slice(&iv), ciphertext.as_slice())
        .map_err(|_| VaultError::DecryptionFailed)?;

    String::from_utf8(plaintext).map_err(|_| VaultError::DecryptionFailed)
}
