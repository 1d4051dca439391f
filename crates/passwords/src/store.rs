// SPDX-License-Identifier: MIT
// Copyright 2025 CLI Passwords Contributors

// Credential store abstraction - the single source of truth for stored passwords

use crate::error::Result;
use crate::keychain::KeyringStore;
use crate::key::CredentialKey;
use crate::memory::MemoryStore;

/// A secure key-value service for secrets, keyed by namespace + username.
///
/// Implementations report every backend failure through [`crate::Error`] so
/// callers never have to know which concrete store is plugged in.
pub trait CredentialStore {
    /// Look up the stored secret. `Ok(None)` means nothing is stored for `key`.
    fn get(&self, key: &CredentialKey) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &CredentialKey, value: &str) -> Result<()>;

    /// Remove the stored secret. Deleting a missing key is not an error.
    fn delete(&self, key: &CredentialKey) -> Result<()>;
}

impl<T: CredentialStore + ?Sized> CredentialStore for &T {
    fn get(&self, key: &CredentialKey) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &CredentialKey, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &CredentialKey) -> Result<()> {
        (**self).delete(key)
    }
}

/// Store selected at runtime from configuration
#[derive(Debug)]
pub enum Backend {
    Keyring(KeyringStore),
    Memory(MemoryStore),
}

impl Backend {
    pub fn name(&self) -> &'static str {
        match self {
            Backend::Keyring(_) => "keyring",
            Backend::Memory(_) => "memory",
        }
    }
}

impl CredentialStore for Backend {
    fn get(&self, key: &CredentialKey) -> Result<Option<String>> {
        match self {
            Backend::Keyring(store) => store.get(key),
            Backend::Memory(store) => store.get(key),
        }
    }

    fn set(&self, key: &CredentialKey, value: &str) -> Result<()> {
        match self {
            Backend::Keyring(store) => store.set(key, value),
            Backend::Memory(store) => store.set(key, value),
        }
    }

    fn delete(&self, key: &CredentialKey) -> Result<()> {
        match self {
            Backend::Keyring(store) => store.delete(key),
            Backend::Memory(store) => store.delete(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_delegates_to_memory() {
        let backend = Backend::Memory(MemoryStore::new());
        let key = CredentialKey::new("db", "alice").unwrap();

        assert_eq!(backend.name(), "memory");
        assert_eq!(backend.get(&key).unwrap(), None);

        backend.set(&key, "secret1").unwrap();
        assert_eq!(backend.get(&key).unwrap().as_deref(), Some("secret1"));

        backend.delete(&key).unwrap();
        assert_eq!(backend.get(&key).unwrap(), None);
    }

    #[test]
    fn test_store_usable_through_reference() {
        fn read_via<S: CredentialStore>(store: S, key: &CredentialKey) -> Option<String> {
            store.get(key).unwrap()
        }

        let store = MemoryStore::new();
        let key = CredentialKey::new("db", "alice").unwrap();
        store.set(&key, "secret1").unwrap();

        assert_eq!(read_via(&store, &key).as_deref(), Some("secret1"));
    }
}
