// SPDX-License-Identifier: MIT
// Copyright 2025 CLI Passwords Contributors

// In-process backend for headless environments and tests

use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use zeroize::Zeroizing;

use crate::error::{Error, Result};
use crate::key::CredentialKey;
use crate::store::CredentialStore;

type Entries = HashMap<CredentialKey, Zeroizing<String>>;

/// [`CredentialStore`] that keeps secrets in memory for the life of the process.
///
/// Values are zeroized when replaced, deleted, or when the store is dropped.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<Entries>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored secrets
    pub fn len(&self) -> usize {
        // A poisoned map still holds its entries, count them anyway
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, Entries>> {
        self.entries
            .lock()
            .map_err(|_| Error::StoreUnavailable("memory store lock poisoned".to_string()))
    }
}

impl fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStore")
            .field("entries", &self.len())
            .finish()
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self, key: &CredentialKey) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).map(|value| value.to_string()))
    }

    fn set(&self, key: &CredentialKey, value: &str) -> Result<()> {
        self.lock()?
            .insert(key.clone(), Zeroizing::new(value.to_string()));
        Ok(())
    }

    fn delete(&self, key: &CredentialKey) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}
