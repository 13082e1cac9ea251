//! Typed credential records over the field codec

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::{decrypt_fields, encrypt_fields, DerivedKey, RandomSource};
use crate::error::Result;

/// Plaintext credential fields - automatically zeroed when dropped
///
/// `None` and blank fields are omitted from the encrypted record
/// entirely, so they come back as `None` after decryption.
#[derive(Default, Clone, Zeroize, ZeroizeOnDrop)]
pub struct CredentialFields {
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
    pub url: Option<String>,
    pub notes: Option<String>,
}

impl CredentialFields {
    fn to_field_map(&self) -> IndexMap<String, Option<String>> {
        IndexMap::from([
            ("username".to_string(), self.username.clone()),
            ("password".to_string(), self.password.clone()),
            ("email".to_string(), self.email.clone()),
            ("url".to_string(), self.url.clone()),
            ("notes".to_string(), self.notes.clone()),
        ])
    }

    fn from_field_map(mut fields: IndexMap<String, String>) -> Self {
        Self {
            username: fields.shift_remove("username"),
            password: fields.shift_remove("password"),
            email: fields.shift_remove("email"),
            url: fields.shift_remove("url"),
            notes: fields.shift_remove("notes"),
        }
    }
}

impl std::fmt::Debug for CredentialFields {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialFields")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("email", &self.email)
            .field("url", &self.url)
            .field("notes", &self.notes.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Stored credential - display metadata plus the encrypted field map
///
/// This is the shape that leaves the device: nothing under `fields` is
/// readable without the vault key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredCredential {
    /// Unique identifier
    pub id: Uuid,

    /// User-friendly name (e.g. "GitHub")
    pub name: String,

    /// Created timestamp
    pub created_at: DateTime<Utc>,

    /// Flat `<field>_encrypted` / `<field>_iv` pairs
    #[serde(flatten)]
    pub fields: IndexMap<String, String>,
}

impl StoredCredential {
    /// Encrypt plaintext fields into a storable credential
    pub fn encrypt(
        name: &str,
        fields: &CredentialFields,
        key: &DerivedKey,
        rng: &mut dyn RandomSource,
    ) -> Result<Self> {
        let encrypted = encrypt_fields(&fields.to_field_map(), key, rng)?;
        let credential = Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            created_at: Utc::now(),
            fields: encrypted,
        };
        debug!("Encrypted credential {}", credential.id);
        Ok(credential)
    }

    /// Decrypt the stored fields back to plaintext
    pub fn decrypt(&self, key: &DerivedKey) -> Result<CredentialFields> {
        let fields = decrypt_fields(&self.fields, key)?;
        debug!("Decrypted credential {}", self.id);
        Ok(CredentialFields::from_field_map(fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{derive_key, generate_salt, KeyDerivationParams, OsRandom};
    use crate::error::VaultError;

    fn test_key() -> DerivedKey {
        let mut rng = OsRandom;
        let salt = generate_salt(&mut rng);
        derive_key("master", &salt, &KeyDerivationParams { iterations: 1_000 }).unwrap()
    }

    fn sample_fields() -> CredentialFields {
        CredentialFields {
            username: Some("johndoe".to_string()),
            password: Some("SecretPass123!".to_string()),
            email: Some("john@example.com".to_string()),
            url: Some("https://example.com/login".to_string()),
            notes: None,
        }
    }

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let key = test_key();
        let mut rng = OsRandom;

        let stored = StoredCredential::encrypt("Example", &sample_fields(), &key, &mut rng).unwrap();
        assert_eq!(stored.name, "Example");

        let fields = stored.decrypt(&key).unwrap();
        assert_eq!(fields.username.as_deref(), Some("johndoe"));
        assert_eq!(fields.password.as_deref(), Some("SecretPass123!"));
        assert_eq!(fields.email.as_deref(), Some("john@example.com"));
        assert_eq!(fields.url.as_deref(), Some("https://example.com/login"));
        assert_eq!(fields.notes, None);
    }

    #[test]
    fn test_absent_fields_have_no_blob() {
        let key = test_key();
        let mut rng = OsRandom;
        let fields = CredentialFields {
            username: Some("johndoe".to_string()),
            password: Some("".to_string()),
            email: None,
            url: None,
            notes: None,
        };

        let stored = StoredCredential::encrypt("Example", &fields, &key, &mut rng).unwrap();

        assert!(stored.fields.contains_key("username_encrypted"));
        assert!(!stored.fields.contains_key("password_encrypted"));
        assert!(!stored.fields.contains_key("email_encrypted"));
        assert_eq!(stored.fields.len(), 2);
    }

    #[test]
    fn test_stored_shape_is_flat() {
        let key = test_key();
        let mut rng = OsRandom;

        let stored = StoredCredential::encrypt("Example", &sample_fields(), &key, &mut rng).unwrap();
        let json = serde_json::to_value(&stored).unwrap();

        // Encrypted pairs sit next to the metadata, not nested
        assert!(json.get("username_encrypted").is_some());
        assert!(json.get("username_iv").is_some());
        assert!(json.get("name").is_some());
        assert!(json.get("fields").is_none());
        // No plaintext anywhere in the serialized form
        assert!(!json.to_string().contains("SecretPass123!"));
    }

    #[test]
    fn test_serde_roundtrip_then_decrypt() {
        let key = test_key();
        let mut rng = OsRandom;

        let stored = StoredCredential::encrypt("Example", &sample_fields(), &key, &mut rng).unwrap();
        let json = serde_json::to_string(&stored).unwrap();
        let back: StoredCredential = serde_json::from_str(&json).unwrap();

        assert_eq!(back.id, stored.id);
        let fields = back.decrypt(&key).unwrap();
        assert_eq!(fields.password.as_deref(), Some("SecretPass123!"));
    }

    #[test]
    fn test_wrong_key_propagates() {
        let key = test_key();
        let other_key = test_key();
        let mut rng = OsRandom;

        let stored = StoredCredential::encrypt("Example", &sample_fields(), &key, &mut rng).unwrap();
        assert!(matches!(
            stored.decrypt(&other_key),
            Err(VaultError::DecryptionFailed)
        ));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let fields = sample_fields();
        let debug = format!("{:?}", fields);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("SecretPass123!"));
    }
}
