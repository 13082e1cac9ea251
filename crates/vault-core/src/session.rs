//! Unlock session owning the derived vault key
//!
//! The key lives exactly as long as the session value: `unlock`
//! derives it, engine calls borrow it, and `lock` (or any other drop
//! path, including unwinding) zeroes it. Nothing here is serialized or
//! persisted.

use tracing::info;

use crate::crypto::{derive_key, DerivedKey, KeyDerivationParams};
use crate::error::Result;

/// An unlocked vault scope - sole owner of the encryption key
pub struct VaultSession {
    key: DerivedKey,
}

impl VaultSession {
    /// Derive the vault key from the master password and open a session
    ///
    /// Long-running (the full key stretching happens here); callers
    /// needing a responsive UI run this off the interactive thread and
    /// cancel by discarding the in-flight call.
    pub fn unlock(password: &str, salt: &str, params: &KeyDerivationParams) -> Result<Self> {
        let key = derive_key(password, salt, params)?;
        info!("Vault unlocked");
        Ok(Self { key })
    }

    /// Borrow the key for engine calls
    pub fn key(&self) -> &DerivedKey {
        &self.key
    }

    /// End the session; the key is zeroed as it drops
    pub fn lock(self) {
        info!("Vault locked");
    }
}

impl std::fmt::Debug for VaultSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultSession")
            .field("key", &"[REDACTED]")
            .finish()
    }
}
