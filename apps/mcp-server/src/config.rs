use anyhow::{anyhow, Context, Result};
use config::Environment;
use hyperliquid_sdk::{ExchangeClient, Network, Wallet};
use serde::Deserialize;

/// Prefix of every environment variable the server reads
pub const ENV_PREFIX: &str = "HYPERLIQUID";

/// Server configuration (from `HYPERLIQUID_*` environment variables)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Hex secp256k1 key, `HYPERLIQUID_PRIVATE_KEY`
    pub private_key: Option<String>,
    /// `"true"` selects testnet, `HYPERLIQUID_TESTNET`
    pub testnet: Option<String>,
    /// API URL override, `HYPERLIQUID_BASE_URL`
    pub base_url: Option<String>,
}

impl Config {
    /// Load configuration from the process environment
    ///
    /// A `.env` file in the working directory is read first when present.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_environment(Environment::with_prefix(ENV_PREFIX))
    }

    pub fn from_environment(source: Environment) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder().add_source(source).build()?;
        settings.try_deserialize()
    }

    pub fn network(&self) -> Network {
        Network::from_testnet_flag(self.testnet.as_deref() == Some("true"))
    }

    pub fn private_key(&self) -> Result<&str> {
        self.private_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| anyhow!("HYPERLIQUID_PRIVATE_KEY environment variable is required"))
    }

    /// Build the exchange client this configuration describes
    pub fn client(&self) -> Result<ExchangeClient> {
        let wallet = Wallet::from_hex(self.private_key()?).context("Failed to load wallet")?;
        let network = self.network();

        Ok(match &self.base_url {
            Some(url) => ExchangeClient::with_base_url(url.as_str(), wallet, network),
            None => ExchangeClient::new(wallet, network),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const KEY: &str = "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

    fn load(vars: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_environment(Environment::with_prefix(ENV_PREFIX).source(Some(map)))
            .expect("Failed to load config")
    }

    #[test]
    fn test_missing_private_key() {
        let config = load(&[]);
        let err = config.private_key().unwrap_err();
        assert_eq!(
            err.to_string(),
            "HYPERLIQUID_PRIVATE_KEY environment variable is required"
        );
        assert!(config.client().is_err());
    }

    #[test]
    fn test_testnet_flag() {
        assert_eq!(load(&[]).network(), Network::Mainnet);
        assert_eq!(load(&[("HYPERLIQUID_TESTNET", "true")]).network(), Network::Testnet);
        assert_eq!(load(&[("HYPERLIQUID_TESTNET", "1")]).network(), Network::Mainnet);
        assert_eq!(load(&[("HYPERLIQUID_TESTNET", "TRUE")]).network(), Network::Mainnet);
    }

    #[test]
    fn test_client_from_config() {
        let config = load(&[
            ("HYPERLIQUID_PRIVATE_KEY", KEY),
            ("HYPERLIQUID_TESTNET", "true"),
        ]);
        let client = config.client().expect("Failed to build client");
        assert_eq!(client.network(), Network::Testnet);
        assert_eq!(client.base_url(), "https://api.hyperliquid-testnet.xyz");
        assert!(client.wallet_address().starts_with("0x"));
    }

    #[test]
    fn test_base_url_override() {
        let config = load(&[
            ("HYPERLIQUID_PRIVATE_KEY", KEY),
            ("HYPERLIQUID_BASE_URL", "http://127.0.0.1:3001/"),
        ]);
        let client = config.client().expect("Failed to build client");
        assert_eq!(client.network(), Network::Mainnet);
        assert_eq!(client.base_url(), "http://127.0.0.1:3001");
    }

    #[test]
    fn test_invalid_private_key() {
        let config = load(&[("HYPERLIQUID_PRIVATE_KEY", "0xnothex")]);
        assert!(config.client().is_err());
    }
}
