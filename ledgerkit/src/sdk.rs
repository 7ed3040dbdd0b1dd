//! [`Sdk`] context wiring configuration, client, services, and wallets.

use std::sync::Arc;

use crate::chain::{ChainProvider, ProviderFactory, build_providers};
use crate::client::{Client, HttpClient};
use crate::config::Config;
use crate::error::Error;
use crate::services::{AuthService, UserService};
use crate::wallet::WalletAdapterRegistry;

/// Explicitly constructed SDK context.
///
/// Owns everything the services and provider helpers need, so nothing is
/// looked up from process-wide state.
#[derive(Debug)]
pub struct Sdk {
    config: Config,
    client: Arc<dyn Client>,
    auth: AuthService,
    users: UserService,
    wallets: WalletAdapterRegistry,
}

impl Sdk {
    /// Wire services around an existing `client`, with the default wallet
    /// registry.
    pub fn new(config: Config, client: Arc<dyn Client>) -> Self {
        Self {
            auth: AuthService::new(Arc::clone(&client)),
            users: UserService::new(Arc::clone(&client)),
            wallets: WalletAdapterRegistry::with_defaults(),
            config,
            client,
        }
    }

    /// Build an [`HttpClient`] from `config` and wire services around it.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built from `config`.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let client = HttpClient::from_config(config)?;
        tracing::info!(api_url = %client.base_url(), "sdk initialised");
        Ok(Self::new(config.clone(), Arc::new(client)))
    }

    /// Configuration the context was built with.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Shared request client.
    #[must_use]
    pub fn client(&self) -> Arc<dyn Client> {
        Arc::clone(&self.client)
    }

    /// Authentication service.
    #[must_use]
    pub const fn auth(&self) -> &AuthService {
        &self.auth
    }

    /// User service.
    #[must_use]
    pub const fn users(&self) -> &UserService {
        &self.users
    }

    /// Wallet adapter registry.
    #[must_use]
    pub const fn wallets(&self) -> &WalletAdapterRegistry {
        &self.wallets
    }

    /// Wallet adapter registry, for registering adapters.
    pub const fn wallets_mut(&mut self) -> &mut WalletAdapterRegistry {
        &mut self.wallets
    }

    /// [`ProviderFactory::create_provider`], with `network` defaulting to
    /// [`Config::network`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedBlockchain`] for unknown families.
    pub fn create_provider(
        &self,
        blockchain: &str,
        network: Option<&str>,
        wallet: &str,
    ) -> Result<ChainProvider, Error> {
        let network = network.unwrap_or(&self.config.network);
        ProviderFactory::create_provider(blockchain, network, wallet)
    }

    /// Providers declared under `[chains]` in the configuration.
    #[must_use]
    pub fn configured_providers(&self) -> Vec<ChainProvider> {
        build_providers(&self.config.chains)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::services::testing::RecordingClient;

    #[test]
    fn debug_output_lists_services_and_client() {
        let config = Config {
            api_url: "https://api.example.com".to_owned(),
            ..Config::default()
        };
        let sdk = Sdk::new(config.clone(), Arc::new(HttpClient::from_config(&config).unwrap()));
        let debug = format!("{sdk:?}");
        assert!(debug.starts_with("Sdk"));
        assert!(debug.contains("AuthService"));
        assert!(debug.contains("HttpClient"));
        assert!(debug.contains("https://api.example.com/"));
    }

    #[tokio::test]
    async fn services_share_the_injected_client() {
        let client = Arc::new(RecordingClient::ok(json!({ "ok": true })));
        let sdk = Sdk::new(Config::default(), client.clone());

        sdk.auth().login("ada", "pw").await.unwrap();
        sdk.users().get_profile("7").await.unwrap();

        let paths: Vec<_> = client.recorded().into_iter().map(|r| r.path).collect();
        assert_eq!(paths, vec!["/auth/login", "/users/7"]);
    }

    #[test]
    fn from_config_rejects_invalid_url() {
        let config = Config {
            api_url: "::".to_owned(),
            ..Config::default()
        };
        assert!(matches!(Sdk::from_config(&config), Err(Error::Config(_))));
    }

    #[cfg(all(feature = "chain-xrpl", feature = "chain-aptos"))]
    #[test]
    fn create_provider_defaults_to_configured_network() {
        use crate::chain::ChainProviderOps;

        let config = Config {
            api_url: "http://localhost:1".to_owned(),
            network: "devnet".to_owned(),
            ..Config::default()
        };
        let sdk = Sdk::from_config(&config).unwrap();

        let provider = sdk.create_provider("APTOS", None, "").unwrap();
        assert_eq!(provider.network(), "devnet");
        let provider = sdk.create_provider("xrpl", Some("mainnet"), "xaman").unwrap();
        assert_eq!(provider.network(), "mainnet");
        assert!(sdk.create_provider("tron", None, "").is_err());
    }

    #[cfg(feature = "chain-aptos")]
    #[test]
    fn registry_is_owned_and_mutable() {
        use crate::chain::Blockchain;
        use crate::wallet::InjectedWallet;

        let mut sdk = Sdk::new(
            Config::default(),
            Arc::new(RecordingClient::ok(serde_json::Value::Null)),
        );
        sdk.wallets_mut()
            .register_adapter("Pontem", Arc::new(InjectedWallet::new("Pontem", [Blockchain::Aptos])));
        assert_eq!(sdk.wallets().get_adapter("pontem").unwrap().name(), "Pontem");
        assert!(sdk.wallets().available_wallets().ends_with(&["pontem".to_owned()]));
    }
}
