// SPDX-License-Identifier: MIT
// Copyright 2025 CLI Passwords Contributors

// Error types for CLI Passwords

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid credential key: {0}")]
    InvalidKey(String),

    #[error("Credential store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Credential error: {0}")]
    Credential(String),

    #[error("Prompt error: {0}")]
    Prompt(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
