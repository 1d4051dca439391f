// SPDX-License-Identifier: MIT
// Copyright 2025 CLI Passwords Contributors

// CLI Passwords - Command-line front end
// Get, store, expire, and inspect passwords kept in the system keychain

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli_passwords::{
    Backend, CredentialKey, CredentialStore, GetOptions, KeyringStore, PasswordManager,
    PasswordsConfig, TerminalPrompt,
};

#[derive(Parser)]
#[command(name = "cli-passwords")]
#[command(about = "Get, store, and expire command line tool passwords", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the password, prompting only if none is stored
    Get {
        /// Namespace, usually the name of the tool
        namespace: String,

        /// Username the password belongs to
        username: String,

        /// Prompt even if a password is stored
        #[arg(short, long)]
        refresh: bool,

        /// Text shown when prompting
        #[arg(short, long)]
        prompt: Option<String>,
    },

    /// Prompt for a password and store it
    Set {
        /// Namespace, usually the name of the tool
        namespace: String,

        /// Username the password belongs to
        username: String,

        /// Text shown when prompting
        #[arg(short, long)]
        prompt: Option<String>,
    },

    /// Delete a stored password
    Expire {
        /// Namespace, usually the name of the tool
        namespace: String,

        /// Username the password belongs to
        username: String,
    },

    /// Show configuration and keychain status
    Status {
        /// Namespace to check for a stored password
        #[arg(requires = "username")]
        namespace: Option<String>,

        /// Username to check for a stored password
        #[arg(requires = "namespace")]
        username: Option<String>,
    },
}

fn main() -> Result<()> {
    // Logs go to stderr so `get` output stays pipeable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cli_passwords=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => PasswordsConfig::load_from(path),
        None => PasswordsConfig::load(),
    }
    .context("Failed to load configuration")?;
    debug!("Loaded configuration: {:?}", config);

    let manager = PasswordManager::from_config(&config, TerminalPrompt::new());

    match cli.command {
        Commands::Get {
            namespace,
            username,
            refresh,
            prompt,
        } => {
            let key = CredentialKey::new(namespace, username)?;
            let options = GetOptions {
                display: prompt,
                refresh,
            };
            get_password(&manager, &key, &options)?;
        }
        Commands::Set {
            namespace,
            username,
            prompt,
        } => {
            let key = CredentialKey::new(namespace, username)?;
            let options = GetOptions {
                display: prompt,
                refresh: true,
            };
            set_password(&manager, &key, &options)?;
        }
        Commands::Expire {
            namespace,
            username,
        } => {
            let key = CredentialKey::new(namespace, username)?;
            expire_password(&manager, &key)?;
        }
        Commands::Status {
            namespace,
            username,
        } => {
            let key = match (namespace, username) {
                (Some(namespace), Some(username)) => {
                    Some(CredentialKey::new(namespace, username)?)
                }
                _ => None,
            };
            show_status(&cli.config, &config, &manager, key.as_ref())?;
        }
    }

    Ok(())
}

fn get_password(
    manager: &PasswordManager<Backend, TerminalPrompt>,
    key: &CredentialKey,
    options: &GetOptions,
) -> Result<()> {
    let password = manager
        .get_password_with(key, options)
        .with_context(|| format!("Failed to get password for {}", key))?;
    println!("{}", password.as_str());
    Ok(())
}

fn set_password(
    manager: &PasswordManager<Backend, TerminalPrompt>,
    key: &CredentialKey,
    options: &GetOptions,
) -> Result<()> {
    manager
        .get_password_with(key, options)
        .with_context(|| format!("Failed to store password for {}", key))?;
    println!(
        "{}",
        format!("✓ Password stored for {} ({})", key, manager.store().name()).green()
    );
    Ok(())
}

fn expire_password(
    manager: &PasswordManager<Backend, TerminalPrompt>,
    key: &CredentialKey,
) -> Result<()> {
    manager
        .expire_password(key)
        .with_context(|| format!("Failed to expire password for {}", key))?;
    println!("{}", format!("✓ Password expired for {}", key).green());
    Ok(())
}

fn show_status(
    config_override: &Option<PathBuf>,
    config: &PasswordsConfig,
    manager: &PasswordManager<Backend, TerminalPrompt>,
    key: Option<&CredentialKey>,
) -> Result<()> {
    let config_path = match config_override {
        Some(path) => path.clone(),
        None => PasswordsConfig::config_path()?,
    };

    println!("{}", "CLI Passwords Status".bold());
    println!(
        "  Config:   {}{}",
        config_path.display().to_string().dimmed(),
        if config_path.exists() { "" } else { " (not found, using defaults)" }
    );
    println!("  Backend:  {}", manager.store().name().cyan());
    println!("  Retries:  {}", config.retries);

    if KeyringStore::is_available() {
        println!("  Keychain: {}", "available".green());
    } else {
        println!("  Keychain: {}", "unavailable".yellow());
    }

    if let Some(key) = key {
        let stored = manager
            .store()
            .get(key)
            .with_context(|| format!("Failed to read password for {}", key))?
            .is_some_and(|password| !password.is_empty());
        if stored {
            println!("  {}: {}", key, "stored".green());
        } else {
            println!("  {}: {}", key, "not stored".dimmed());
        }
    }

    Ok(())
}
