//! Error types for vault-core

use thiserror::Error;

/// Result type alias for vault operations
pub type Result<T> = std::result::Result<T, VaultError>;

/// Vault error types
#[derive(Error, Debug)]
pub enum VaultError {
    #[error("Nothing to encrypt - value is empty")]
    EmptyPlaintext,

    #[error("Malformed encrypted blob: {0}")]
    MalformedBlob(String),

    #[error("Malformed encrypted record: {0}")]
    MalformedRecord(String),

    #[error("Invalid salt: {0}")]
    InvalidSalt(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivationError(String),

    #[error("Encryption failed: {0}")]
    EncryptionError(String),

    // One variant for wrong key and tampered data; callers must not be
    // able to tell the two apart.
    #[error("Decryption failed - wrong key or tampered data")]
    DecryptionFailed,

    #[error("Invalid key length: expected {expected}, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },
}
