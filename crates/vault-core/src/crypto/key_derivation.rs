//! Master-password key derivation and login hashing
//!
//! Two independent derivations run over the same (password, salt) pair:
//!
//! - PBKDF2-HMAC-SHA256 stretches the password into the 256-bit vault
//!   encryption key. The iteration count makes offline guessing
//!   expensive while keeping a single unlock under a second on typical
//!   hardware.
//! - Argon2id produces the value a remote verifier checks at login.
//!   Different algorithm family, so holding the login hash gives an
//!   attacker no path back to the encryption key.

use argon2::{Algorithm, Argon2, Params, Version};
use pbkdf2::pbkdf2_hmac;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::random::RandomSource;
use crate::error::{Result, VaultError};

/// Salt length in bytes
const SALT_LEN: usize = 16;
/// Key length in bytes (AES-256)
const KEY_LEN: usize = 32;

/// Parameters for PBKDF2 key stretching
///
/// Serialized alongside the salt so the iteration count can be raised
/// for new vaults without breaking existing ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyDerivationParams {
    /// PBKDF2-HMAC-SHA256 iteration count
    pub iterations: u32,
}

impl Default for KeyDerivationParams {
    fn default() -> Self {
        Self {
            iterations: 600_000,
        }
    }
}

impl KeyDerivationParams {
    /// Create parameters with the default iteration count
    pub fn new() -> Self {
        Self::default()
    }

    /// Verify that parameters are within acceptable ranges
    pub fn validate(&self) -> Result<()> {
        if self.iterations < 1_000 {
            return Err(VaultError::KeyDerivationError(
                "Iteration count too low (minimum: 1000)".to_string(),
            ));
        }
        Ok(())
    }
}

/// Vault encryption key - automatically zeroed when dropped
///
/// Never serialized or logged. The caller (typically a
/// [`crate::session::VaultSession`]) owns the key for the duration of
/// an unlock and drops it on lock.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_LEN],
}

impl DerivedKey {
    /// Wrap raw key bytes
    pub fn new(key: [u8; KEY_LEN]) -> Self {
        Self { key }
    }

    /// Get the key bytes (use carefully - avoid copying)
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.key
    }

    /// Create from a slice (must be exactly 32 bytes)
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        if slice.len() != KEY_LEN {
            return Err(VaultError::InvalidKeyLength {
                expected: KEY_LEN,
                got: slice.len(),
            });
        }
        let mut key = [0u8; KEY_LEN];
        key.copy_from_slice(slice);
        Ok(Self { key })
    }
}

impl Clone for DerivedKey {
    fn clone(&self) -> Self {
        Self { key: self.key }
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Generate a fresh random salt, base64 encoded
///
/// Generated once per vault and persisted; existing data must never be
/// re-salted without re-encrypting everything under the new key.
pub fn generate_salt(rng: &mut dyn RandomSource) -> String {
    let mut salt = [0u8; SALT_LEN];
    rng.fill_bytes(&mut salt);
    base64_encode(&salt)
}

/// Derive the vault encryption key from a master password
///
/// Deterministic: the same password, salt, and parameters always yield
/// the same key, so a key derived tomorrow decrypts data encrypted
/// today.
///
/// # Arguments
/// * `password` - The user's master password
/// * `salt` - A base64 salt (use `generate_salt()` to create one)
/// * `params` - Iteration count, persisted next to the salt
pub fn derive_key(password: &str, salt: &str, params: &KeyDerivationParams) -> Result<DerivedKey> {
    params.validate()?;
    let salt_bytes = decode_salt(salt)?;

    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), &salt_bytes, params.iterations, &mut key);

    Ok(DerivedKey::new(key))
}

/// Derive the hash a remote verifier checks at login, hex encoded
///
/// Argon2id over the same salt bytes as `derive_key`. Stable per
/// (password, salt), one-way, and independent of the encryption key:
/// a server holding salt + hash can verify password knowledge but can
/// decrypt nothing.
pub fn hash_password_for_auth(password: &str, salt: &str) -> Result<String> {
    let salt_bytes = decode_salt(salt)?;

    let params = Params::new(19_456, 2, 1, Some(KEY_LEN))
        .map_err(|e| VaultError::KeyDerivationError(e.to_string()))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut output = [0u8; KEY_LEN];
    argon2
        .hash_password_into(password.as_bytes(), &salt_bytes, &mut output)
        .map_err(|e| VaultError::KeyDerivationError(e.to_string()))?;

    Ok(hex::encode(output))
}

fn decode_salt(salt: &str) -> Result<Vec<u8>> {
    if salt.trim().is_empty() {
        return Err(VaultError::InvalidSalt("salt is empty".to_string()));
    }
    let bytes = base64_decode(salt)?;
    if bytes.len() < 8 {
        return Err(VaultError::InvalidSalt(format!(
            "salt too short: {} bytes",
            bytes.len()
        )));
    }
    Ok(bytes)
}

fn base64_encode(data: &[u8]) -> String {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD.encode(data)
}

fn base64_decode(encoded: &str) -> Result<Vec<u8>> {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .map_err(|e| VaultError::InvalidSalt(e.to_string()))
}
