// SPDX-License-Identifier: MIT
// Copyright 2025 CLI Passwords Contributors

// Interactive password entry

use colored::Colorize;
use dialoguer::Password;

use crate::error::{Error, Result};

/// Reads a secret from the user.
pub trait SecretPrompt {
    /// Block until the user has typed a secret. Input must not be echoed.
    fn prompt_secret(&self, message: &str) -> Result<String>;

    /// Tell the user something without asking for input
    fn notice(&self, _message: &str) {}
}

impl<T: SecretPrompt + ?Sized> SecretPrompt for &T {
    fn prompt_secret(&self, message: &str) -> Result<String> {
        (**self).prompt_secret(message)
    }

    fn notice(&self, message: &str) {
        (**self).notice(message)
    }
}

/// Prompts on the controlling terminal with hidden input
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompt;

impl TerminalPrompt {
    pub fn new() -> Self {
        Self
    }
}

impl SecretPrompt for TerminalPrompt {
    fn prompt_secret(&self, message: &str) -> Result<String> {
        Password::new()
            .with_prompt(trim_prompt(message))
            .interact()
            .map_err(|e| Error::Prompt(format!("Failed to read password input: {}", e)))
    }

    fn notice(&self, message: &str) {
        eprintln!("{}", message.yellow());
    }
}

/// dialoguer renders its own ": " after the prompt
fn trim_prompt(message: &str) -> &str {
    message.trim_end().trim_end_matches(':').trim_end()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_prompt() {
        assert_eq!(
            trim_prompt("my-system password for username: "),
            "my-system password for username"
        );
        assert_eq!(trim_prompt("Password"), "Password");
        assert_eq!(trim_prompt("Token :"), "Token");
    }
}
