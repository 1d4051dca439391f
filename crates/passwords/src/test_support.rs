// SPDX-License-Identifier: MIT
// Copyright 2025 CLI Passwords Contributors

// Fakes shared by the unit tests

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;

use crate::error::{Error, Result};
use crate::key::CredentialKey;
use crate::prompt::SecretPrompt;
use crate::store::CredentialStore;

/// Answers prompts from a queue and records what was asked
#[derive(Default)]
pub(crate) struct ScriptedPrompt {
    answers: RefCell<VecDeque<String>>,
    messages: RefCell<Vec<String>>,
    notices: RefCell<Vec<String>>,
    prompts: Cell<usize>,
}

impl ScriptedPrompt {
    pub(crate) fn new(answers: &[&str]) -> Self {
        Self {
            answers: RefCell::new(answers.iter().map(|a| a.to_string()).collect()),
            ..Default::default()
        }
    }

    pub(crate) fn prompts(&self) -> usize {
        self.prompts.get()
    }

    pub(crate) fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }

    pub(crate) fn notices(&self) -> Vec<String> {
        self.notices.borrow().clone()
    }
}

impl SecretPrompt for ScriptedPrompt {
    fn prompt_secret(&self, message: &str) -> Result<String> {
        self.prompts.set(self.prompts.get() + 1);
        self.messages.borrow_mut().push(message.to_string());
        self.answers
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| Error::Prompt("no scripted answer left".to_string()))
    }

    fn notice(&self, message: &str) {
        self.notices.borrow_mut().push(message.to_string());
    }
}

/// Store whose backend can never be reached
pub(crate) struct UnavailableStore;

impl CredentialStore for UnavailableStore {
    fn get(&self, _key: &CredentialKey) -> Result<Option<String>> {
        Err(Error::StoreUnavailable("no secret service".to_string()))
    }

    fn set(&self, _key: &CredentialKey, _value: &str) -> Result<()> {
        Err(Error::StoreUnavailable("no secret service".to_string()))
    }

    fn delete(&self, _key: &CredentialKey) -> Result<()> {
        Err(Error::StoreUnavailable("no secret service".to_string()))
    }
}

/// Error type of an operation that needs a password
#[derive(Debug)]
pub(crate) enum LoginError {
    BadPassword,
    Network,
    Passwords(Error),
}

impl From<Error> for LoginError {
    fn from(err: Error) -> Self {
        LoginError::Passwords(err)
    }
}

impl fmt::Display for LoginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoginError::BadPassword => write!(f, "authentication failed"),
            LoginError::Network => write!(f, "network unreachable"),
            LoginError::Passwords(err) => write!(f, "{}", err),
        }
    }
}

pub(crate) fn key(namespace: &str, username: &str) -> CredentialKey {
    CredentialKey::new(namespace, username).unwrap()
}
