// SPDX-License-Identifier: MIT
// Copyright 2025 CLI Passwords Contributors

// Keychain backend - passwords live in the platform secure store

use keyring::Entry;
use tracing::debug;

use crate::error::{Error, Result};
use crate::key::CredentialKey;
use crate::store::CredentialStore;

/// Environment variable that disables the system keychain entirely
pub const SKIP_KEYRING_ENV: &str = "CLI_PASSWORDS_SKIP_KEYRING";

/// [`CredentialStore`] backed by the system keychain (Keychain, Credential Manager,
/// kernel keyutils), using the namespace as the service name.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyringStore;

impl KeyringStore {
    pub fn new() -> Self {
        Self
    }

    /// Check if keychain/keyring is available and functional
    ///
    /// Attempts to create an entry without storing anything. Returns `false` when
    /// the `CLI_PASSWORDS_SKIP_KEYRING` environment variable is set to 1 or true.
    pub fn is_available() -> bool {
        if should_skip_keyring() {
            return false;
        }

        Entry::new("cli-passwords", "__availability_test__").is_ok()
    }

    fn entry(key: &CredentialKey) -> Result<Entry> {
        Entry::new(key.namespace(), key.username()).map_err(map_keyring_error)
    }
}

impl CredentialStore for KeyringStore {
    fn get(&self, key: &CredentialKey) -> Result<Option<String>> {
        match Self::entry(key)?.get_password() {
            Ok(password) => Ok(Some(password)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(map_keyring_error(e)),
        }
    }

    fn set(&self, key: &CredentialKey, value: &str) -> Result<()> {
        Self::entry(key)?
            .set_password(value)
            .map_err(map_keyring_error)?;
        debug!("Stored password for {} in keychain", key);
        Ok(())
    }

    fn delete(&self, key: &CredentialKey) -> Result<()> {
        match Self::entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(map_keyring_error(e)),
        }
    }
}

/// Check if keyring operations should be completely skipped
pub(crate) fn should_skip_keyring() -> bool {
    std::env::var(SKIP_KEYRING_ENV)
        .map(|val| is_truthy(&val))
        .unwrap_or(false)
}

fn is_truthy(val: &str) -> bool {
    matches!(val, "1" | "true" | "True" | "TRUE")
}

fn map_keyring_error(err: keyring::Error) -> Error {
    match err {
        keyring::Error::NoStorageAccess(e) => Error::StoreUnavailable(e.to_string()),
        keyring::Error::PlatformFailure(e) => Error::StoreUnavailable(e.to_string()),
        other => Error::Credential(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthy_values() {
        for val in ["1", "true", "True", "TRUE"] {
            assert!(is_truthy(val), "{val} should skip the keyring");
        }
        for val in ["0", "false", "", "yes"] {
            assert!(!is_truthy(val), "{val} should not skip the keyring");
        }
    }

    fn use_mock_keyring() {
        keyring::set_default_credential_builder(keyring::mock::default_credential_builder());
    }

    #[test]
    fn test_get_missing_entry_is_none() {
        use_mock_keyring();
        let store = KeyringStore::new();
        let key = CredentialKey::new("db", "alice").unwrap();

        assert_eq!(store.get(&key).unwrap(), None);
    }

    #[test]
    fn test_delete_missing_entry_is_noop() {
        use_mock_keyring();
        let store = KeyringStore::new();
        let key = CredentialKey::new("db", "alice").unwrap();

        assert!(store.delete(&key).is_ok());
    }

    #[test]
    fn test_error_mapping() {
        let err = map_keyring_error(keyring::Error::NoStorageAccess("locked".into()));
        assert!(matches!(err, Error::StoreUnavailable(_)));

        let err = map_keyring_error(keyring::Error::PlatformFailure("no dbus".into()));
        assert!(matches!(err, Error::StoreUnavailable(_)));

        let err = map_keyring_error(keyring::Error::NoEntry);
        assert!(matches!(err, Error::Credential(_)));
    }
}
