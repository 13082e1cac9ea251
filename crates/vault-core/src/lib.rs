//! # vault-core
//!
//! Client-side encryption engine for a zero-knowledge password vault:
//! - PBKDF2 master-password key derivation with a separate Argon2id
//!   login hash
//! - AES-256-GCM field-by-field encryption of credential records
//! - Injectable secure randomness with unbiased index sampling
//! - Password generation and strength scoring
//!
//! Plaintext and derived keys never leave the calling process. The
//! server-facing surface is the salt, the login hash, and opaque
//! `<field>_encrypted` / `<field>_iv` pairs.

pub mod credential;
pub mod crypto;
pub mod error;
pub mod session;

pub use credential::{CredentialFields, StoredCredential};
pub use crypto::{
    decrypt, decrypt_fields, derive_key, encrypt, encrypt_fields, generate_password,
    generate_salt, hash_password_for_auth, score_strength, DerivedKey, EncryptedBlob,
    GeneratorOptions, KeyDerivationParams, OsRandom, RandomSource, StrengthLabel, StrengthReport,
};
pub use error::{Result, VaultError};
pub use session::VaultSession;
