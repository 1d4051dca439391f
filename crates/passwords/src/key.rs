// SPDX-License-Identifier: MIT
// Copyright 2025 CLI Passwords Contributors

use std::fmt;

use crate::error::{Error, Result};

/// Identifies a stored secret: the namespace (usually the tool name) plus the username.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CredentialKey {
    namespace: String,
    username: String,
}

impl CredentialKey {
    /// Build a key, rejecting empty or whitespace-only parts
    pub fn new(namespace: impl Into<String>, username: impl Into<String>) -> Result<Self> {
        let namespace = namespace.into();
        let username = username.into();

        if namespace.trim().is_empty() {
            return Err(Error::InvalidKey("namespace cannot be empty".to_string()));
        }
        if username.trim().is_empty() {
            return Err(Error::InvalidKey("username cannot be empty".to_string()));
        }

        Ok(Self {
            namespace,
            username,
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Message shown when the user has to type the password in
    pub fn default_prompt(&self) -> String {
        format!("{} password for {}", self.namespace, self.username)
    }

    /// Fill `{namespace}` and `{username}` placeholders in a prompt template
    pub fn render_prompt(&self, template: &str) -> String {
        template
            .replace("{namespace}", &self.namespace)
            .replace("{username}", &self.username)
    }
}

impl fmt::Display for CredentialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_key() {
        let key = CredentialKey::new("db", "alice").unwrap();
        assert_eq!(key.namespace(), "db");
        assert_eq!(key.username(), "alice");
        assert_eq!(key.to_string(), "db/alice");
    }

    #[test]
    fn test_empty_parts_rejected() {
        assert!(matches!(
            CredentialKey::new("", "alice"),
            Err(Error::InvalidKey(_))
        ));
        assert!(matches!(
            CredentialKey::new("db", "   "),
            Err(Error::InvalidKey(_))
        ));
    }

    #[test]
    fn test_default_prompt() {
        let key = CredentialKey::new("my-system", "username").unwrap();
        assert_eq!(key.default_prompt(), "my-system password for username");
    }

    #[test]
    fn test_render_prompt() {
        let key = CredentialKey::new("db", "alice").unwrap();
        assert_eq!(
            key.render_prompt("Enter {username}'s {namespace} password"),
            "Enter alice's db password"
        );
        assert_eq!(key.render_prompt("Password"), "Password");
    }
}
