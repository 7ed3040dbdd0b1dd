//! Wallet adapters and the name-keyed adapter registry.
//!
//! [`WalletAdapterRegistry`] is an ordinary value: build one (or take the
//! one owned by [`Sdk`](crate::Sdk)) and pass it to whatever needs it.
//! Names are normalised to lowercase, so `"Phantom"`, `"phantom"` and
//! `"PHANTOM"` address the same slot.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::chain::Blockchain;
use crate::error::Error;

/// Capability surface of a wallet integration.
pub trait WalletAdapter: Send + Sync + fmt::Debug {
    /// Display name of the wallet.
    fn name(&self) -> &str;

    /// Whether the wallet can act on `chain`.
    fn supports(&self, chain: Blockchain) -> bool;
}

/// Wallet injected by a browser extension or mobile app, identified by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectedWallet {
    name: String,
    chains: Vec<Blockchain>,
}

impl InjectedWallet {
    /// Creates an adapter named `name` that serves `chains`.
    pub fn new(name: impl Into<String>, chains: impl IntoIterator<Item = Blockchain>) -> Self {
        Self {
            name: name.into(),
            chains: chains.into_iter().collect(),
        }
    }
}

impl WalletAdapter for InjectedWallet {
    fn name(&self) -> &str {
        &self.name
    }

    fn supports(&self, chain: Blockchain) -> bool {
        self.chains.contains(&chain)
    }
}

/// Registry of wallet adapters keyed by lowercase name.
///
/// Registering an existing name replaces the adapter but keeps the name's
/// original position in [`available_wallets`](Self::available_wallets).
#[derive(Debug, Default, Clone)]
pub struct WalletAdapterRegistry {
    adapters: HashMap<String, Arc<dyn WalletAdapter>>,
    order: Vec<String>,
}

impl WalletAdapterRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry pre-populated with the well-known wallets of every
    /// family enabled in this build.
    #[must_use]
    pub fn with_defaults() -> Self {
        #[allow(unused_mut)]
        let mut registry = Self::new();
        #[cfg(feature = "chain-xrpl")]
        for name in ["Xaman", "Crossmark", "GemWallet"] {
            registry.register_adapter(name, Arc::new(InjectedWallet::new(name, [Blockchain::Xrpl])));
        }
        #[cfg(feature = "chain-aptos")]
        for name in ["Petra", "Martian"] {
            registry.register_adapter(name, Arc::new(InjectedWallet::new(name, [Blockchain::Aptos])));
        }
        registry
    }

    /// Store `adapter` under the lowercased `name`, replacing any previous
    /// adapter for that name.
    pub fn register_adapter(&mut self, name: &str, adapter: Arc<dyn WalletAdapter>) {
        let key = name.to_lowercase();
        if self.adapters.insert(key.clone(), adapter).is_some() {
            tracing::debug!(wallet = %key, "wallet adapter replaced");
        } else {
            tracing::debug!(wallet = %key, "wallet adapter registered");
            self.order.push(key);
        }
    }

    /// Look up the adapter registered under `name` (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`Error::WalletNotFound`] naming `name` if nothing is registered.
    pub fn get_adapter(&self, name: &str) -> Result<Arc<dyn WalletAdapter>, Error> {
        self.adapters
            .get(&name.to_lowercase())
            .cloned()
            .ok_or_else(|| Error::WalletNotFound(name.to_owned()))
    }

    /// Registered (lowercase) names in insertion order.
    #[must_use]
    pub fn available_wallets(&self) -> Vec<String> {
        self.order.clone()
    }

    /// Registered names whose adapter supports `chain`, in insertion order.
    #[must_use]
    pub fn wallets_for(&self, chain: Blockchain) -> Vec<String> {
        self.order
            .iter()
            .filter(|name| {
                self.adapters
                    .get(name.as_str())
                    .is_some_and(|adapter| adapter.supports(chain))
            })
            .cloned()
            .collect()
    }
}
