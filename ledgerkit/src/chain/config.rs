//! `[chains.<blockchain>]` configuration tables and their (de)serialisation.

use std::ops::Deref;

use serde::{Deserialize, Serialize};

use super::kind::Blockchain;

/// Provider parameters for one chain (matches TOML structure).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfigInner {
    /// Network name (`mainnet`, `testnet`, ...) or endpoint URL.
    pub network: String,
    /// Wallet to bind. Required for families where
    /// [`Blockchain::requires_wallet`] holds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet: Option<String>,
}

/// One configured chain, keyed by its family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainConfig {
    /// Family parsed from the table key.
    pub blockchain: Blockchain,
    /// TOML-level configuration.
    pub inner: ChainConfigInner,
}

/// Collection of [`ChainConfig`] entries.
///
/// Serialised as a map keyed by blockchain identifier. Keys are matched
/// case-insensitively; unknown families are rejected at parse time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainsConfig(pub Vec<ChainConfig>);

impl Deref for ChainsConfig {
    type Target = Vec<ChainConfig>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Serialize for ChainsConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for chain in &self.0 {
            map.serialize_entry(chain.blockchain.as_str(), &chain.inner)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ChainsConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use std::fmt;

        use serde::de::{Error as _, MapAccess, Visitor};

        struct ChainsVisitor;

        impl<'de> Visitor<'de> for ChainsVisitor {
            type Value = ChainsConfig;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a map of blockchain identifiers to chain configurations")
            }

            fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut chains: Vec<ChainConfig> =
                    Vec::with_capacity(access.size_hint().unwrap_or(0));

                while let Some(key) = access.next_key::<String>()? {
                    let blockchain: Blockchain = key.parse().map_err(M::Error::custom)?;
                    let inner: ChainConfigInner = access.next_value()?;
                    if blockchain.requires_wallet() && inner.wallet.is_none() {
                        return Err(M::Error::custom(format!(
                            "chain '{key}' requires a wallet"
                        )));
                    }
                    if chains.iter().any(|c| c.blockchain == blockchain) {
                        return Err(M::Error::custom(format!(
                            "chain '{blockchain}' configured more than once"
                        )));
                    }
                    chains.push(ChainConfig { blockchain, inner });
                }

                Ok(ChainsConfig(chains))
            }
        }

        deserializer.deserialize_map(ChainsVisitor)
    }
}

#[cfg(all(test, feature = "chain-xrpl", feature = "chain-aptos"))]
mod tests {
    use super::*;

    #[test]
    fn parses_keys_case_insensitively() {
        let chains: ChainsConfig = toml::from_str(
            r#"
            [XRPL]
            network = "mainnet"
            wallet = "crossmark"
            "#,
        )
        .unwrap();
        assert_eq!(chains.len(), 1);
        assert_eq!(chains[0].blockchain, Blockchain::Xrpl);
        assert_eq!(chains[0].inner.wallet.as_deref(), Some("crossmark"));
    }

    #[test]
    fn rejects_unknown_family() {
        let err = toml::from_str::<ChainsConfig>(
            r#"
            [ethereum]
            network = "mainnet"
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("unsupported blockchain: ethereum"));
    }

    #[test]
    fn xrpl_without_wallet_is_rejected() {
        let err = toml::from_str::<ChainsConfig>(
            r#"
            [xrpl]
            network = "testnet"
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("requires a wallet"));
    }

    #[test]
    fn duplicate_family_with_different_case_is_rejected() {
        let err = toml::from_str::<ChainsConfig>(
            r#"
            [aptos]
            network = "testnet"

            [Aptos]
            network = "mainnet"
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn serialises_under_lowercase_keys() {
        let chains = ChainsConfig(vec![ChainConfig {
            blockchain: Blockchain::Aptos,
            inner: ChainConfigInner {
                network: "devnet".to_owned(),
                wallet: None,
            },
        }]);
        let out = toml::to_string(&chains).unwrap();
        assert!(out.contains("[aptos]"));
        assert!(out.contains("network = \"devnet\""));
        assert!(!out.contains("wallet"));
    }
}
