//! Field-by-field encryption of structured records
//!
//! A record goes to storage as a flat map of `<field>_encrypted` /
//! `<field>_iv` pairs. Fields with no content contribute no entries at
//! all, so "no value" stays distinguishable from "empty string" without
//! leaking the distinction through ciphertext length.

use indexmap::IndexMap;

use crate::crypto::encryption::{decrypt, encrypt};
use crate::crypto::key_derivation::DerivedKey;
use crate::crypto::random::RandomSource;
use crate::error::{Result, VaultError};

const ENCRYPTED_SUFFIX: &str = "_encrypted";
const IV_SUFFIX: &str = "_iv";

/// Encrypt each present, non-blank field of a record independently
///
/// Every field draws its own IV, so equal values in different fields
/// (or records) never share ciphertext. Absent and blank fields are
/// skipped entirely.
pub fn encrypt_fields(
    fields: &IndexMap<String, Option<String>>,
    key: &DerivedKey,
    rng: &mut dyn RandomSource,
) -> Result<IndexMap<String, String>> {
    let mut record = IndexMap::new();

    for (name, value) in fields {
        let value = match value {
            Some(v) if !v.trim().is_empty() => v,
            _ => continue,
        };
        let blob = encrypt(value, key, rng)?;
        record.insert(format!("{name}{ENCRYPTED_SUFFIX}"), blob.ciphertext);
        record.insert(format!("{name}{IV_SUFFIX}"), blob.iv);
    }

    Ok(record)
}

/// Decrypt every encrypted field of a record back to plaintext
///
/// A `<field>_encrypted` entry without its `<field>_iv` companion is a
/// malformed record. Any single field failing to decrypt aborts the
/// whole call - a partially decryptable record is a tampering signal,
/// not a normal condition.
pub fn decrypt_fields(
    record: &IndexMap<String, String>,
    key: &DerivedKey,
) -> Result<IndexMap<String, String>> {
    let mut fields = IndexMap::new();

    for (record_key, ciphertext) in record {
        let Some(name) = record_key.strip_suffix(ENCRYPTED_SUFFIX) else {
            continue;
        };
        if ciphertext.is_empty() {
            continue;
        }
        let iv_key = format!("{name}{IV_SUFFIX}");
        let iv = record
            .get(&iv_key)
            .filter(|iv| !iv.is_empty())
            .ok_or_else(|| {
                VaultError::MalformedRecord(format!("{record_key} has no matching {iv_key}"))
            })?;

        let plaintext = decrypt(ciphertext, iv, key)?;
        fields.insert(name.to_string(), plaintext);
    }

    Ok(fields)
}
