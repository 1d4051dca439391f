// SPDX-License-Identifier: MIT
// Copyright 2025 CLI Passwords Contributors

// CLI Passwords - Library
// Get passwords from the system keychain, prompt only when needed, and
// retry operations with a fresh password when the stored one is rejected

pub mod config;
pub mod error;
pub mod key;
pub mod keychain;
pub mod manager;
pub mod memory;
pub mod prompt;
pub mod retry;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{BackendKind, PasswordsConfig};
pub use error::{Error, Result};
pub use key::CredentialKey;
pub use keychain::{KeyringStore, SKIP_KEYRING_ENV};
pub use manager::{GetOptions, PasswordManager};
pub use memory::MemoryStore;
pub use prompt::{SecretPrompt, TerminalPrompt};
pub use retry::{RetryPassword, DEFAULT_RETRIES};
pub use store::{Backend, CredentialStore};

// Re-export so callers can name the returned password type
pub use zeroize::Zeroizing;
