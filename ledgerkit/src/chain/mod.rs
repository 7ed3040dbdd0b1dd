//! Blockchain families, providers, and chain configuration.
//!
//! - [`kind`] — [`Blockchain`] enum and case-insensitive name parsing.
//! - [`provider`] — [`ChainProvider`] enum, [`ChainProviderOps`], and [`ProviderFactory`].
//! - [`config`] — `[chains.<name>]` TOML tables and their (de)serialisation.
//! - `xrpl` / `aptos` — chain-family providers, each behind its cargo feature.

mod config;
mod kind;
mod provider;

#[cfg(feature = "chain-aptos")]
mod aptos;
#[cfg(feature = "chain-xrpl")]
mod xrpl;

pub use self::config::*;
pub use self::kind::*;
pub use self::provider::*;

#[cfg(feature = "chain-aptos")]
pub use self::aptos::AptosProvider;
#[cfg(feature = "chain-xrpl")]
pub use self::xrpl::XrplProvider;
