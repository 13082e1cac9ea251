//! Cryptographic engine for client-side vault encryption
//!
//! This module provides:
//! - PBKDF2 key stretching with a separate Argon2id login hash
//! - AES-256-GCM authenticated encryption, per-field over records
//! - Injectable secure randomness with unbiased index sampling
//! - Password generation and strength scoring

mod encryption;
mod field_codec;
mod generator;
mod key_derivation;
mod random;

pub use encryption::{decrypt, encrypt, EncryptedBlob};
pub use field_codec::{decrypt_fields, encrypt_fields};
pub use generator::{generate_password, score_strength, GeneratorOptions, StrengthLabel, StrengthReport};
pub use key_derivation::{
    derive_key, generate_salt, hash_password_for_auth, DerivedKey, KeyDerivationParams,
};
pub use random::{OsRandom, RandomSource};
