//! Chain provider types and the provider factory.

#[cfg(any(feature = "chain-xrpl", feature = "chain-aptos"))]
use std::sync::Arc;

use serde::Serialize;
use url::Url;

#[cfg(feature = "chain-aptos")]
use super::aptos::AptosProvider;
use super::config::ChainsConfig;
use super::kind::Blockchain;
#[cfg(feature = "chain-xrpl")]
use super::xrpl::XrplProvider;
use crate::error::Error;

/// Network operations common to every provider.
pub trait ChainProviderOps {
    /// Family this provider talks to.
    fn blockchain(&self) -> Blockchain;

    /// Network name or URL the provider was built with, as given.
    fn network(&self) -> &str;

    /// Resolved RPC endpoint, if the network is known or is itself a URL.
    fn rpc_url(&self) -> Option<&Url>;

    /// Wallet bound at construction, for families that take one.
    fn wallet(&self) -> Option<&str>;
}

/// Unified provider wrapping chain-family–specific implementations.
#[derive(Debug, Clone)]
pub enum ChainProvider {
    /// XRP Ledger provider.
    #[cfg(feature = "chain-xrpl")]
    Xrpl(Arc<XrplProvider>),
    /// Aptos provider.
    #[cfg(feature = "chain-aptos")]
    Aptos(Arc<AptosProvider>),
}

impl ChainProviderOps for ChainProvider {
    fn blockchain(&self) -> Blockchain {
        match self {
            #[cfg(feature = "chain-xrpl")]
            Self::Xrpl(provider) => provider.blockchain(),
            #[cfg(feature = "chain-aptos")]
            Self::Aptos(provider) => provider.blockchain(),
            #[allow(unreachable_patterns)]
            _ => unreachable!("ChainProvider variant not enabled in this build"),
        }
    }

    fn network(&self) -> &str {
        match self {
            #[cfg(feature = "chain-xrpl")]
            Self::Xrpl(provider) => provider.network(),
            #[cfg(feature = "chain-aptos")]
            Self::Aptos(provider) => provider.network(),
            #[allow(unreachable_patterns)]
            _ => unreachable!("ChainProvider variant not enabled in this build"),
        }
    }

    fn rpc_url(&self) -> Option<&Url> {
        match self {
            #[cfg(feature = "chain-xrpl")]
            Self::Xrpl(provider) => provider.rpc_url(),
            #[cfg(feature = "chain-aptos")]
            Self::Aptos(provider) => provider.rpc_url(),
            #[allow(unreachable_patterns)]
            _ => unreachable!("ChainProvider variant not enabled in this build"),
        }
    }

    fn wallet(&self) -> Option<&str> {
        match self {
            #[cfg(feature = "chain-xrpl")]
            Self::Xrpl(provider) => provider.wallet(),
            #[cfg(feature = "chain-aptos")]
            Self::Aptos(provider) => provider.wallet(),
            #[allow(unreachable_patterns)]
            _ => unreachable!("ChainProvider variant not enabled in this build"),
        }
    }
}

/// Serialisable snapshot of a provider.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderInfo {
    /// Chain family.
    pub blockchain: Blockchain,
    /// Network as given at construction.
    pub network: String,
    /// Resolved endpoint, if any.
    pub rpc_url: Option<String>,
    /// Bound wallet, if any.
    pub wallet: Option<String>,
}

impl ChainProvider {
    /// Snapshot of the provider's public parameters.
    #[must_use]
    pub fn info(&self) -> ProviderInfo {
        ProviderInfo {
            blockchain: self.blockchain(),
            network: self.network().to_owned(),
            rpc_url: self.rpc_url().map(ToString::to_string),
            wallet: self.wallet().map(str::to_owned),
        }
    }
}

/// Stateless factory mapping a blockchain name to a fresh [`ChainProvider`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ProviderFactory;

impl ProviderFactory {
    /// Parse `blockchain` (case-insensitive) and build its provider.
    ///
    /// XRPL providers are built from `wallet` and `network`; Aptos providers
    /// from `network` alone, so `wallet` is ignored for them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedBlockchain`] carrying `blockchain` when it
    /// names no family enabled in this build.
    pub fn create_provider(
        blockchain: &str,
        network: &str,
        wallet: &str,
    ) -> Result<ChainProvider, Error> {
        let chain = blockchain.parse::<Blockchain>().inspect_err(|_| {
            tracing::warn!(blockchain, "unsupported blockchain requested");
        })?;
        Ok(Self::build(chain, network, wallet))
    }

    /// Build a provider for an already-parsed [`Blockchain`].
    #[must_use]
    #[allow(unused_variables, unreachable_code)]
    pub fn build(chain: Blockchain, network: &str, wallet: &str) -> ChainProvider {
        let provider = match chain {
            #[cfg(feature = "chain-xrpl")]
            Blockchain::Xrpl => ChainProvider::Xrpl(Arc::new(XrplProvider::new(wallet, network))),
            #[cfg(feature = "chain-aptos")]
            Blockchain::Aptos => ChainProvider::Aptos(Arc::new(AptosProvider::new(network))),
            #[allow(unreachable_patterns)]
            _ => unreachable!("Blockchain variant not enabled in this build"),
        };
        tracing::debug!(
            %chain,
            network,
            rpc_url = ?provider.rpc_url().map(Url::as_str),
            "chain provider created"
        );
        provider
    }
}

/// Build one provider per `[chains.<name>]` entry.
#[must_use]
pub fn build_providers(chains: &ChainsConfig) -> Vec<ChainProvider> {
    chains
        .iter()
        .map(|chain| {
            ProviderFactory::build(
                chain.blockchain,
                &chain.inner.network,
                chain.inner.wallet.as_deref().unwrap_or_default(),
            )
        })
        .collect()
}

/// Accept `network` as an endpoint when it is an absolute HTTP(S) or
/// `WebSocket` URL.
#[allow(dead_code)]
pub(crate) fn custom_endpoint(network: &str) -> Option<Url> {
    Url::parse(network)
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https" | "ws" | "wss"))
}
