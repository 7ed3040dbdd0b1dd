//! XRP Ledger provider.

use url::Url;

use super::kind::Blockchain;
use super::provider::{ChainProviderOps, custom_endpoint};

const MAINNET_RPC: &str = "https://s1.ripple.com:51234/";
const TESTNET_RPC: &str = "https://s.altnet.rippletest.net:51234/";
const DEVNET_RPC: &str = "https://s.devnet.rippletest.net:51234/";

/// Provider bound to one XRPL network and the wallet that will sign for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XrplProvider {
    wallet: String,
    network: String,
    rpc_url: Option<Url>,
}

impl XrplProvider {
    /// Creates a provider for `wallet` on `network`.
    ///
    /// `network` is either a well-known name (`mainnet`, `testnet`, `devnet`)
    /// or a JSON-RPC / `WebSocket` URL. Anything else leaves [`rpc_url`]
    /// unset.
    ///
    /// [`rpc_url`]: ChainProviderOps::rpc_url
    pub fn new(wallet: impl Into<String>, network: impl Into<String>) -> Self {
        let network = network.into();
        let rpc_url = resolve_rpc_url(&network);
        Self {
            wallet: wallet.into(),
            network,
            rpc_url,
        }
    }
}

fn resolve_rpc_url(network: &str) -> Option<Url> {
    let known = match network.to_ascii_lowercase().as_str() {
        "mainnet" => Some(MAINNET_RPC),
        "testnet" => Some(TESTNET_RPC),
        "devnet" => Some(DEVNET_RPC),
        _ => None,
    };
    known.map_or_else(|| custom_endpoint(network), |url| Url::parse(url).ok())
}

impl ChainProviderOps for XrplProvider {
    fn blockchain(&self) -> Blockchain {
        Blockchain::Xrpl
    }

    fn network(&self) -> &str {
        &self.network
    }

    fn rpc_url(&self) -> Option<&Url> {
        self.rpc_url.as_ref()
    }

    fn wallet(&self) -> Option<&str> {
        Some(&self.wallet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_public_networks_case_insensitively() {
        let provider = XrplProvider::new("xaman", "TestNet");
        assert_eq!(provider.rpc_url().unwrap().as_str(), TESTNET_RPC);
        assert_eq!(provider.network(), "TestNet");
        assert_eq!(provider.wallet(), Some("xaman"));

        let provider = XrplProvider::new("xaman", "mainnet");
        assert_eq!(provider.rpc_url().unwrap().as_str(), MAINNET_RPC);
    }

    #[test]
    fn accepts_custom_websocket_endpoint() {
        let provider = XrplProvider::new("crossmark", "wss://xrplcluster.com");
        assert_eq!(provider.rpc_url().unwrap().scheme(), "wss");
    }

    #[test]
    fn unknown_network_has_no_endpoint() {
        let provider = XrplProvider::new("crossmark", "sidechain-7");
        assert!(provider.rpc_url().is_none());
        assert_eq!(provider.network(), "sidechain-7");
    }
}
