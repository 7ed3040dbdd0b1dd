//! Aptos provider.

use url::Url;

use super::kind::Blockchain;
use super::provider::{ChainProviderOps, custom_endpoint};

const MAINNET_RPC: &str = "https://fullnode.mainnet.aptoslabs.com/v1";
const TESTNET_RPC: &str = "https://fullnode.testnet.aptoslabs.com/v1";
const DEVNET_RPC: &str = "https://fullnode.devnet.aptoslabs.com/v1";
const LOCAL_RPC: &str = "http://127.0.0.1:8080/v1";

/// Provider bound to one Aptos network. Aptos wallets are chosen at
/// signing time, so none is bound here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AptosProvider {
    network: String,
    rpc_url: Option<Url>,
}

impl AptosProvider {
    /// Creates a provider for `network` (`mainnet`, `testnet`, `devnet`,
    /// `local`, or a fullnode URL).
    pub fn new(network: impl Into<String>) -> Self {
        let network = network.into();
        let rpc_url = resolve_rpc_url(&network);
        Self { network, rpc_url }
    }
}

fn resolve_rpc_url(network: &str) -> Option<Url> {
    let known = match network.to_ascii_lowercase().as_str() {
        "mainnet" => Some(MAINNET_RPC),
        "testnet" => Some(TESTNET_RPC),
        "devnet" => Some(DEVNET_RPC),
        "local" | "localnet" => Some(LOCAL_RPC),
        _ => None,
    };
    known.map_or_else(|| custom_endpoint(network), |url| Url::parse(url).ok())
}

impl ChainProviderOps for AptosProvider {
    fn blockchain(&self) -> Blockchain {
        Blockchain::Aptos
    }

    fn network(&self) -> &str {
        &self.network
    }

    fn rpc_url(&self) -> Option<&Url> {
        self.rpc_url.as_ref()
    }

    fn wallet(&self) -> Option<&str> {
        None
    }
}
