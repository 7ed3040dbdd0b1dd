//! Supported blockchain families.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::Error;

/// Identifier of the XRP Ledger family.
#[cfg(feature = "chain-xrpl")]
pub const XRPL: &str = "xrpl";

/// Identifier of the Aptos family.
#[cfg(feature = "chain-aptos")]
pub const APTOS: &str = "aptos";

/// Blockchain family a provider is built for.
///
/// Parsed case-insensitively from its identifier (`"XRPL"`, `"xrpl"` and
/// `"XrPl"` are the same family). Families compiled out of the build are
/// reported as [`Error::UnsupportedBlockchain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Blockchain {
    /// XRP Ledger.
    #[cfg(feature = "chain-xrpl")]
    Xrpl,
    /// Aptos.
    #[cfg(feature = "chain-aptos")]
    Aptos,
}

impl Blockchain {
    /// Lowercase identifier of this family.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            #[cfg(feature = "chain-xrpl")]
            Self::Xrpl => XRPL,
            #[cfg(feature = "chain-aptos")]
            Self::Aptos => APTOS,
            #[allow(unreachable_patterns)]
            _ => unreachable!("Blockchain variant not enabled in this build"),
        }
    }

    /// Whether building a provider for this family needs a wallet.
    #[must_use]
    pub const fn requires_wallet(self) -> bool {
        match self {
            #[cfg(feature = "chain-xrpl")]
            Self::Xrpl => true,
            #[allow(unreachable_patterns)]
            _ => false,
        }
    }

    /// Every family enabled in this build, in declaration order.
    #[must_use]
    pub fn supported() -> Vec<Self> {
        #[allow(unused_mut)]
        let mut chains = Vec::with_capacity(2);
        #[cfg(feature = "chain-xrpl")]
        chains.push(Self::Xrpl);
        #[cfg(feature = "chain-aptos")]
        chains.push(Self::Aptos);
        chains
    }
}

impl fmt::Display for Blockchain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Blockchain {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::supported()
            .into_iter()
            .find(|chain| s.eq_ignore_ascii_case(chain.as_str()))
            .ok_or_else(|| Error::UnsupportedBlockchain(s.to_owned()))
    }
}
