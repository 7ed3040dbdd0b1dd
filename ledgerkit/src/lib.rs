//! ledgerkit — client SDK for account services and blockchain providers.
//!
//! - [`client`] — [`Client`] request seam and the reqwest-backed [`HttpClient`].
//! - [`services`] — [`AuthService`] and [`UserService`] wrappers.
//! - [`chain`] — [`Blockchain`] families, [`ChainProvider`] and [`ProviderFactory`].
//! - [`wallet`] — [`WalletAdapter`] trait and [`WalletAdapterRegistry`].
//! - [`config`] — [`Config`], the first-wins [`Configuration`] holder, TOML loading.
//! - [`Sdk`] — context object tying the above together.
//!
//! ```no_run
//! # async fn demo() -> Result<(), ledgerkit::Error> {
//! use ledgerkit::{Config, Sdk};
//!
//! let sdk = Sdk::from_config(&Config::default())?;
//! let profile = sdk.users().get_profile("42").await?;
//! let provider = sdk.create_provider("xrpl", Some("testnet"), "xaman")?;
//! # let _ = (profile, provider);
//! # Ok(())
//! # }
//! ```

#[cfg(not(any(feature = "chain-xrpl", feature = "chain-aptos")))]
compile_error!("ledgerkit needs at least one chain feature: `chain-xrpl` or `chain-aptos`");

pub mod chain;
pub mod client;
pub mod config;
pub mod error;
pub mod services;
#[cfg(feature = "telemetry")]
pub mod telemetry;
pub mod wallet;

mod sdk;

pub use chain::{Blockchain, ChainProvider, ChainProviderOps, ProviderFactory};
pub use client::{Client, HttpClient, Method};
pub use config::{Config, Configuration, load_config};
pub use error::Error;
pub use sdk::Sdk;
pub use services::{AuthService, UserService};
pub use wallet::{WalletAdapter, WalletAdapterRegistry};
