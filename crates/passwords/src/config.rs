// SPDX-License-Identifier: MIT
// Copyright 2025 CLI Passwords Contributors

// Configuration file handling (backend selection, retry count, prompt text)

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::keychain::{should_skip_keyring, KeyringStore, SKIP_KEYRING_ENV};
use crate::manager::PasswordManager;
use crate::memory::MemoryStore;
use crate::prompt::SecretPrompt;
use crate::retry::DEFAULT_RETRIES;
use crate::store::Backend;

/// Which credential store to use
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    /// Platform keychain, shared across processes
    #[default]
    Keyring,
    /// Process memory only (headless environments)
    Memory,
}

/// CLI Passwords configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct PasswordsConfig {
    /// Credential store backend
    #[serde(default)]
    pub backend: BackendKind,

    /// Default number of retries after a rejected password
    #[serde(default = "default_retries")]
    pub retries: u32,

    /// Prompt template, `{namespace}` and `{username}` are substituted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

fn default_retries() -> u32 {
    DEFAULT_RETRIES
}

impl Default for PasswordsConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            retries: default_retries(),
            prompt: None,
        }
    }
}

impl PasswordsConfig {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, falling back to defaults if it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;
        Ok(config_dir.join("cli-passwords").join("config.toml"))
    }

    /// Backend to use once the environment override is applied
    pub fn effective_backend(&self) -> BackendKind {
        if self.backend == BackendKind::Keyring && should_skip_keyring() {
            warn!(
                "{} is set, passwords will only be kept in memory",
                SKIP_KEYRING_ENV
            );
            return BackendKind::Memory;
        }
        self.backend
    }

    /// Construct the configured credential store
    pub fn build_store(&self) -> Backend {
        match self.effective_backend() {
            BackendKind::Keyring => Backend::Keyring(KeyringStore::new()),
            BackendKind::Memory => Backend::Memory(MemoryStore::new()),
        }
    }
}

impl<P: SecretPrompt> PasswordManager<Backend, P> {
    /// Build a manager with the store, retry count, and prompt template from `config`
    pub fn from_config(config: &PasswordsConfig, prompt: P) -> Self {
        let manager = PasswordManager::new(config.build_store(), prompt)
            .with_default_retries(config.retries);

        match &config.prompt {
            Some(template) => manager.with_prompt_template(template.clone()),
            None => manager,
        }
    }
}
