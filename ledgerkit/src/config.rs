//! Configuration loading, the first-wins [`Configuration`] holder, and
//! default template generation.
//!
//! # Configuration File Format
//!
//! ```toml
//! api_url = "$LEDGERKIT_API_URL"
//! timeout_secs = 30
//! network = "testnet"
//!
//! [chains.xrpl]
//! network = "testnet"
//! wallet = "xaman"
//!
//! [chains.aptos]
//! network = "testnet"
//! ```
//!
//! Keys the SDK does not know are kept and reachable through [`Config::get`].

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::chain::ChainsConfig;
use crate::error::Error;

/// Environment variable consulted when `api_url` is absent from the file.
pub const API_URL_ENV: &str = "LEDGERKIT_API_URL";

const DEFAULT_API_URL: &str = "http://localhost:8080";

/// SDK configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL every service path is joined onto.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Per-request timeout in seconds (default: 30).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Bearer token attached to every request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
    /// Default network for providers created without an explicit one.
    #[serde(default = "default_network")]
    pub network: String,
    /// Pre-declared chain providers.
    #[serde(default, skip_serializing_if = "chains_is_empty")]
    pub chains: ChainsConfig,
    /// Any other top-level key.
    #[serde(flatten)]
    pub extra: BTreeMap<String, toml::Value>,
}

fn default_api_url() -> String {
    std::env::var(API_URL_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_owned())
}

const fn default_timeout_secs() -> u64 {
    30
}

fn default_network() -> String {
    "testnet".to_owned()
}

fn chains_is_empty(chains: &ChainsConfig) -> bool {
    chains.is_empty()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            api_token: None,
            network: default_network(),
            chains: ChainsConfig::default(),
            extra: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Value of an extra (non-typed) key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&toml::Value> {
        self.extra.get(key)
    }

    /// Set an extra key, returning the previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<toml::Value>) -> Option<toml::Value> {
        self.extra.insert(key.into(), value.into())
    }

    /// Replace `$VAR` / `${VAR}` references in string settings with the
    /// referenced environment values.
    fn resolve_env_refs(mut self) -> Result<Self, Error> {
        self.api_url = resolve_env(&self.api_url)?;
        self.api_token = self.api_token.as_deref().map(resolve_env).transpose()?;
        Ok(self)
    }
}

/// Holder keeping the first configuration it is given.
///
/// Construct one explicitly and pass it where it is needed; it is safe to
/// share between threads.
#[derive(Debug, Default)]
pub struct Configuration {
    instance: OnceLock<Config>,
}

impl Configuration {
    /// Creates an uninitialised holder.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            instance: OnceLock::new(),
        }
    }

    /// Store `config` if nothing is stored yet, then return what is stored.
    ///
    /// Once initialised, later values are ignored. Returns `None` only when
    /// no configuration has ever been supplied.
    pub fn get_instance(&self, config: Option<Config>) -> Option<&Config> {
        if let Some(config) = config
            && self.instance.set(config).is_err()
        {
            tracing::debug!("configuration already initialised, ignoring new value");
        }
        self.instance.get()
    }

    /// The stored configuration, shared.
    #[must_use]
    pub fn get_config(&self) -> Option<&Config> {
        self.instance.get()
    }
}

/// Resolve an environment-variable reference (`$VAR` or `${VAR}`), returning
/// the literal string unchanged if it does not match either pattern.
///
/// # Errors
///
/// Returns [`Error::Config`] if the referenced variable is not set.
pub fn resolve_env(value: &str) -> Result<String, Error> {
    let var_name = value
        .strip_prefix("${")
        .and_then(|v| v.strip_suffix('}'))
        .or_else(|| {
            value
                .strip_prefix('$')
                .filter(|v| !v.is_empty() && v.chars().all(|c| c.is_alphanumeric() || c == '_'))
        });
    match var_name {
        Some(var_name) => std::env::var(var_name).map_err(|_| {
            Error::config(format!(
                "env var '{var_name}' not found (referenced as '{value}')"
            ))
        }),
        None => Ok(value.to_owned()),
    }
}

/// Load configuration from a TOML file at the given path.
///
/// Values not present in the file fall back to environment variables
/// (`LEDGERKIT_API_URL`) and then to hardcoded defaults.
///
/// # Errors
///
/// Returns an error if the file cannot be resolved, read, or parsed, or if
/// it references an unset environment variable.
pub fn load_config(path: &Path) -> Result<Config, Error> {
    let config_path = path.canonicalize().map_err(|e| {
        Error::config_with(
            format!("failed to resolve config path '{}'", path.display()),
            e,
        )
    })?;
    let content = std::fs::read_to_string(&config_path).map_err(|e| {
        Error::config_with(
            format!("failed to read config file '{}'", config_path.display()),
            e,
        )
    })?;
    let config: Config = toml::from_str(&content).map_err(|e| {
        Error::config_with(
            format!("failed to parse TOML config '{}'", config_path.display()),
            e,
        )
    })?;
    tracing::debug!(path = %config_path.display(), "configuration loaded");
    config.resolve_env_refs()
}

/// Generate a default TOML configuration template.
///
/// The output includes a commented section for every chain family enabled
/// at compile time.
#[must_use]
pub fn generate_default_config() -> String {
    let mut config = String::from(
        r#"# ledgerkit configuration

# Base URL of the account API. Supports "$VAR" / "${VAR}" references.
# Falls back to the LEDGERKIT_API_URL environment variable.
api_url = "http://localhost:8080"

# Per-request timeout in seconds.
timeout_secs = 30

# Bearer token sent with every request.
# api_token = "$LEDGERKIT_API_TOKEN"

# Network used when a command does not name one.
network = "testnet"
"#,
    );

    #[cfg(feature = "chain-xrpl")]
    config.push_str(
        r#"
# ── XRP Ledger ──────────────────────────────────────────────────────
# network: mainnet | testnet | devnet | <rpc url>

[chains.xrpl]
network = "testnet"
wallet = "xaman"
"#,
    );

    #[cfg(feature = "chain-aptos")]
    config.push_str(
        r#"
# ── Aptos ───────────────────────────────────────────────────────────
# network: mainnet | testnet | devnet | local | <fullnode url>

[chains.aptos]
network = "testnet"
"#,
    );

    config
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn config_with_url(url: &str) -> Config {
        Config {
            api_url: url.to_owned(),
            ..Config::default()
        }
    }

    #[test]
    fn first_supplied_configuration_wins() {
        let holder = Configuration::new();
        let x = config_with_url("https://x.example");
        let y = config_with_url("https://y.example");

        assert_eq!(holder.get_instance(Some(x.clone())), Some(&x));
        assert_eq!(holder.get_instance(Some(y)), Some(&x));
        assert_eq!(holder.get_instance(None), Some(&x));
        assert_eq!(holder.get_config(), Some(&x));
    }

    #[test]
    fn uninitialised_holder_is_empty() {
        let holder = Configuration::default();
        assert!(holder.get_instance(None).is_none());
        assert!(holder.get_config().is_none());
    }

    #[test]
    fn resolve_env_literal_and_missing() {
        assert_eq!(resolve_env("https://api.example").unwrap(), "https://api.example");
        assert_eq!(resolve_env("$").unwrap(), "$");
        assert_eq!(resolve_env("$not a var").unwrap(), "$not a var");

        let err = resolve_env("${LEDGERKIT_TEST_SURELY_UNSET_VAR}").unwrap_err();
        assert!(err.to_string().contains("LEDGERKIT_TEST_SURELY_UNSET_VAR"));
        assert!(resolve_env("$LEDGERKIT_TEST_SURELY_UNSET_VAR").is_err());
    }

    #[test]
    fn resolve_env_reads_set_variable() {
        let Ok(path) = std::env::var("PATH") else {
            return;
        };
        assert_eq!(resolve_env("$PATH").unwrap(), path);
        assert_eq!(resolve_env("${PATH}").unwrap(), path);
    }

    #[test]
    fn load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
            api_url = "https://api.example.com/v1"
            timeout_secs = 5
            network = "devnet"
            region = "eu-west"
            "#
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.api_url, "https://api.example.com/v1");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.network, "devnet");
        assert!(config.api_token.is_none());
        assert_eq!(config.get("region").and_then(toml::Value::as_str), Some("eu-west"));
    }

    #[test]
    fn load_config_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, Error::Config(ref m) if m.contains("absent.toml")));
    }

    #[test]
    fn load_config_reports_unset_env_reference() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"api_token = "$LEDGERKIT_TEST_SURELY_UNSET_TOKEN""#).unwrap();
        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("LEDGERKIT_TEST_SURELY_UNSET_TOKEN"));
    }

    #[test]
    fn extra_keys_can_be_set() {
        let mut config = Config::default();
        assert!(config.set("retries", 3_i64).is_none());
        assert_eq!(config.get("retries"), Some(&toml::Value::Integer(3)));
        assert_eq!(config.set("retries", 4_i64), Some(toml::Value::Integer(3)));
    }

    #[test]
    fn default_template_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.network, "testnet");
        assert!(config.extra.is_empty());
        #[cfg(all(feature = "chain-xrpl", feature = "chain-aptos"))]
        assert_eq!(config.chains.len(), 2);
    }
}
