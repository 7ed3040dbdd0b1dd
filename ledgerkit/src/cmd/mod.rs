//! CLI definitions and command implementations for `ledgerkit`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use ledgerkit::Error;

pub mod account;
pub mod chain;
pub mod init;

/// ledgerkit — account API and blockchain provider toolkit.
#[derive(Debug, Parser)]
#[command(name = "ledgerkit")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, global = true, env = "CONFIG", default_value = "config.toml")]
    pub config: PathBuf,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a default TOML configuration file.
    Init {
        /// Output path for the configuration file.
        #[arg(short, long, default_value = "config.toml")]
        output: PathBuf,

        /// Overwrite the file if it already exists.
        #[arg(long, default_value_t = false)]
        force: bool,
    },

    /// Log in against the account API.
    Login {
        /// Account user name.
        #[arg(short, long)]
        username: String,

        /// Account password.
        #[arg(short, long, env = "LEDGERKIT_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Fetch a user profile.
    Profile {
        /// User identifier.
        user_id: String,
    },

    /// Describe the provider built for a blockchain.
    Provider {
        /// Blockchain identifier (`xrpl`, `aptos`), case-insensitive.
        blockchain: String,

        /// Network name or endpoint URL (defaults to the configured network).
        #[arg(short, long)]
        network: Option<String>,

        /// Wallet to bind (required by XRPL).
        #[arg(short, long, default_value = "")]
        wallet: String,
    },

    /// List registered wallet adapters.
    Wallets {
        /// Only list wallets supporting this blockchain.
        #[arg(long)]
        chain: Option<String>,
    },

    /// Describe every provider declared under `[chains]`.
    Chains,
}

/// Print `value` as pretty JSON on stdout.
///
/// # Errors
///
/// Returns [`Error::Encode`] if `value` cannot be serialised.
#[allow(clippy::print_stdout)]
pub fn print_json<T: Serialize>(value: &T) -> Result<(), Error> {
    let out = serde_json::to_string_pretty(value).map_err(|e| Error::Encode(e.to_string()))?;
    println!("{out}");
    Ok(())
}
