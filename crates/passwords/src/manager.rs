// SPDX-License-Identifier: MIT
// Copyright 2025 CLI Passwords Contributors

// Password getter - keychain first, prompt on miss, store what was typed

use tracing::debug;
use zeroize::Zeroizing;

use crate::error::{Error, Result};
use crate::key::CredentialKey;
use crate::prompt::SecretPrompt;
use crate::retry::{RetryPassword, DEFAULT_RETRIES};
use crate::store::CredentialStore;

/// Options for a single password lookup
#[derive(Debug, Clone, Default)]
pub struct GetOptions {
    /// Prompt text, overriding the manager's template and the key's default
    pub display: Option<String>,
    /// Prompt even when a password is already stored
    pub refresh: bool,
}

impl GetOptions {
    pub fn refresh(refresh: bool) -> Self {
        Self {
            refresh,
            ..Default::default()
        }
    }
}

/// Gets passwords from a [`CredentialStore`], asking the user through a
/// [`SecretPrompt`] only when nothing usable is stored.
///
/// The user is effectively asked once and the answer is reused across
/// processes, until the password is expired or refreshed.
///
/// # Examples
/// ```no_run
/// use cli_passwords::{CredentialKey, KeyringStore, PasswordManager, TerminalPrompt};
///
/// let manager = PasswordManager::new(KeyringStore::new(), TerminalPrompt::new());
/// let key = CredentialKey::new("my-system", "username")?;
/// let password = manager.get_password(&key, false)?;
/// # Ok::<(), cli_passwords::Error>(())
/// ```
#[derive(Debug)]
pub struct PasswordManager<S, P> {
    store: S,
    prompt: P,
    prompt_template: Option<String>,
    default_retries: u32,
}

impl<S: CredentialStore, P: SecretPrompt> PasswordManager<S, P> {
    pub fn new(store: S, prompt: P) -> Self {
        Self {
            store,
            prompt,
            prompt_template: None,
            default_retries: DEFAULT_RETRIES,
        }
    }

    /// Use `template` (with `{namespace}`/`{username}` placeholders) as the prompt text
    pub fn with_prompt_template(mut self, template: impl Into<String>) -> Self {
        self.prompt_template = Some(template.into());
        self
    }

    /// Retry count used by [`PasswordManager::retry_password`] unless overridden
    pub fn with_default_retries(mut self, retries: u32) -> Self {
        self.default_retries = retries;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn prompt(&self) -> &P {
        &self.prompt
    }

    pub fn default_retries(&self) -> u32 {
        self.default_retries
    }

    /// Get the password for `key`, prompting only if none is stored or `refresh` is set.
    ///
    /// A freshly typed password is written back to the store before it is returned.
    pub fn get_password(&self, key: &CredentialKey, refresh: bool) -> Result<Zeroizing<String>> {
        self.get_password_with(key, &GetOptions::refresh(refresh))
    }

    /// Same as [`PasswordManager::get_password`] with a custom prompt text
    pub fn get_password_with(
        &self,
        key: &CredentialKey,
        options: &GetOptions,
    ) -> Result<Zeroizing<String>> {
        if !options.refresh {
            if let Some(stored) = self.store.get(key)?.map(Zeroizing::new) {
                // An empty stored value is treated like a missing one
                if !stored.is_empty() {
                    return Ok(stored);
                }
            }
        }

        debug!(
            "Refreshing {} password for user {}",
            key.namespace(),
            key.username()
        );
        let message = self.display_for(key, options);
        let password = Zeroizing::new(self.prompt.prompt_secret(&message)?);
        self.store.set(key, &password)?;

        Ok(password)
    }

    /// Remove the stored password so the next lookup prompts again.
    ///
    /// Expiring a key with nothing stored is a no-op.
    pub fn expire_password(&self, key: &CredentialKey) -> Result<()> {
        debug!(
            "Expiring {} password for user {}",
            key.namespace(),
            key.username()
        );
        self.store.delete(key)
    }

    /// Get the password and hand it to `op` as its first argument, once.
    ///
    /// Lookup failures are converted into the operation's own error type.
    pub fn with_password<T, E, F>(
        &self,
        key: &CredentialKey,
        options: &GetOptions,
        op: F,
    ) -> std::result::Result<T, E>
    where
        E: From<Error>,
        F: FnOnce(&str) -> std::result::Result<T, E>,
    {
        let password = self.get_password_with(key, options)?;
        debug!("Injecting {} password into operation", key);
        op(&password)
    }

    /// Start building a call that re-prompts and retries when the password is rejected
    pub fn retry_password<'a>(&'a self, key: &'a CredentialKey) -> RetryPassword<'a, S, P> {
        RetryPassword::new(self, key)
    }

    fn display_for(&self, key: &CredentialKey, options: &GetOptions) -> String {
        match (&options.display, &self.prompt_template) {
            (Some(display), _) => display.clone(),
            (None, Some(template)) => key.render_prompt(template),
            (None, None) => key.default_prompt(),
        }
    }
}
