// SPDX-License-Identifier: MIT
// Copyright 2025 CLI Passwords Contributors

// Retry with re-prompting when the stored password is rejected

use std::fmt;

use tracing::warn;

use crate::error::Error;
use crate::key::CredentialKey;
use crate::manager::{GetOptions, PasswordManager};
use crate::prompt::SecretPrompt;
use crate::store::CredentialStore;

/// Retries after the first attempt when nothing else is configured
pub const DEFAULT_RETRIES: u32 = 5;

/// An operation that needs a password, retried when the password is wrong.
///
/// Built by [`PasswordManager::retry_password`]. Each attempt gets the password
/// (from the store, or by prompting) and passes it to the operation. When the
/// operation fails with an error the caller designates as an authentication
/// failure, the stored password is expired and the next attempt prompts again.
/// After `retries` additional attempts the last error is returned unchanged.
///
/// # Examples
/// ```no_run
/// use cli_passwords::{CredentialKey, KeyringStore, PasswordManager, TerminalPrompt};
///
/// #[derive(Debug)]
/// enum DbError {
///     AuthFailed,
///     Passwords(cli_passwords::Error),
/// }
///
/// impl From<cli_passwords::Error> for DbError {
///     fn from(err: cli_passwords::Error) -> Self {
///         DbError::Passwords(err)
///     }
/// }
///
/// impl std::fmt::Display for DbError {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         write!(f, "{:?}", self)
///     }
/// }
///
/// fn connect(password: &str, host: &str) -> Result<(), DbError> {
///     # let _ = (password, host);
///     Err(DbError::AuthFailed)
/// }
///
/// let manager = PasswordManager::new(KeyringStore::new(), TerminalPrompt::new());
/// let key = CredentialKey::new("my-system", "username")?;
/// let host = "db.internal";
///
/// let result = manager
///     .retry_password(&key)
///     .retries(3)
///     .call(|e| matches!(e, DbError::AuthFailed), |password| connect(password, host));
/// # let _ = result;
/// # Ok::<(), cli_passwords::Error>(())
/// ```
pub struct RetryPassword<'a, S, P> {
    manager: &'a PasswordManager<S, P>,
    key: &'a CredentialKey,
    retries: u32,
    options: GetOptions,
}

impl<'a, S: CredentialStore, P: SecretPrompt> RetryPassword<'a, S, P> {
    pub(crate) fn new(manager: &'a PasswordManager<S, P>, key: &'a CredentialKey) -> Self {
        Self {
            manager,
            key,
            retries: manager.default_retries(),
            options: GetOptions::default(),
        }
    }

    /// Additional attempts after the first one; `0` means a single try
    pub fn retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Prompt text used whenever the user is asked for the password
    pub fn display(mut self, display: impl Into<String>) -> Self {
        self.options.display = Some(display.into());
        self
    }

    /// Prompt on every attempt, ignoring any stored password
    pub fn refresh(mut self, refresh: bool) -> Self {
        self.options.refresh = refresh;
        self
    }

    /// Run `op` with the password, retrying while `is_auth_failure` matches its error.
    ///
    /// Errors that don't match are returned at once and leave the stored password
    /// alone. Store and prompt errors are converted through `From<Error>` and are
    /// never retried.
    pub fn call<T, E, R, F>(&self, is_auth_failure: R, mut op: F) -> Result<T, E>
    where
        E: From<Error> + fmt::Display,
        R: Fn(&E) -> bool,
        F: FnMut(&str) -> Result<T, E>,
    {
        let key = self.key;
        let mut failures: u32 = 0;

        loop {
            let result = {
                let password = self.manager.get_password_with(key, &self.options)?;
                op(&password)
            };

            let err = match result {
                Ok(value) => return Ok(value),
                Err(err) if is_auth_failure(&err) => err,
                Err(err) => return Err(err),
            };

            failures += 1;
            warn!(
                attempt = failures,
                error = %err,
                "{} password for user {} was rejected",
                key.namespace(),
                key.username()
            );
            self.manager.prompt().notice(&format!(
                "It looks like the {} password for user {} was incorrect.",
                key.namespace(),
                key.username()
            ));
            self.manager.expire_password(key)?;

            if failures > self.retries {
                warn!("Too many failed password attempts for {}", key);
                self.manager.prompt().notice("Too many password attempts");
                return Err(err);
            }
        }
    }
}

impl<S, P> fmt::Debug for RetryPassword<'_, S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryPassword")
            .field("key", self.key)
            .field("retries", &self.retries)
            .field("options", &self.options)
            .finish()
    }
}
