//! `ledgerkit provider` / `wallets` / `chains` — provider and wallet queries.

use std::path::Path;

use ledgerkit::chain::{ProviderInfo, build_providers};
use ledgerkit::config::Config;
use ledgerkit::{Blockchain, Error, ProviderFactory, WalletAdapterRegistry, load_config};

use super::print_json;

/// Execute the `provider` command.
///
/// The configuration file is optional here; without it the default network
/// is used.
///
/// # Errors
///
/// Returns [`Error::UnsupportedBlockchain`] for unknown families, or a
/// configuration error if the file exists but is invalid.
pub fn provider(
    config_path: &Path,
    blockchain: &str,
    network: Option<&str>,
    wallet: &str,
) -> Result<(), Error> {
    let config = optional_config(config_path)?;
    let network = network.unwrap_or(&config.network);
    let provider = ProviderFactory::create_provider(blockchain, network, wallet)?;
    print_json(&provider.info())
}

/// Execute the `wallets` command.
///
/// # Errors
///
/// Returns [`Error::UnsupportedBlockchain`] if `chain` names no family.
pub fn wallets(chain: Option<&str>) -> Result<(), Error> {
    let registry = WalletAdapterRegistry::with_defaults();
    let names = match chain {
        Some(chain) => registry.wallets_for(chain.parse::<Blockchain>()?),
        None => registry.available_wallets(),
    };
    print_json(&names)
}

/// Execute the `chains` command.
///
/// # Errors
///
/// Returns a configuration error if the file cannot be loaded.
pub fn chains(config_path: &Path) -> Result<(), Error> {
    let config = load_config(config_path)?;
    let infos: Vec<ProviderInfo> = build_providers(&config.chains)
        .iter()
        .map(ledgerkit::ChainProvider::info)
        .collect();
    print_json(&infos)
}

fn optional_config(config_path: &Path) -> Result<Config, Error> {
    if config_path.exists() {
        load_config(config_path)
    } else {
        Ok(Config::default())
    }
}
