//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the price publisher.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PublisherConfig {
    /// Publication policy.
    pub publisher: PublicationConfig,

    /// Blockchain integration settings.
    pub blockchain: BlockchainConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Publication policy.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PublicationConfig {
    /// Balance (native units) below which the wallet is reported as low.
    pub min_balance: f64,

    /// Strip per-source evidence from records before signing.
    pub omit_sources: bool,

    /// Skip the publication cycle when the balance is low.
    pub halt_on_low_balance: bool,

    /// Address that receives the data-carrying transactions.
    pub storage_address: String,
}

impl Default for PublicationConfig {
    fn default() -> Self {
        Self {
            min_balance: 0.05,
            omit_sources: false,
            halt_on_low_balance: false,
            storage_address: "0x0000000000000000000000000000000000000000".to_string(),
        }
    }
}

/// Blockchain integration configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BlockchainConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Failover JSON-RPC endpoint URLs.
    pub failover_urls: Vec<String>,

    /// Chain ID (e.g., 1 for Ethereum mainnet, 31337 for local Anvil).
    pub chain_id: u64,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Gas price multiplier (1.0 = estimated, 1.2 = 20% buffer).
    pub gas_price_multiplier: f64,

    /// Maximum gas price in gwei (protection against spikes).
    pub max_gas_price_gwei: u64,
}

impl Default for BlockchainConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8545".to_string(),
            failover_urls: Vec::new(),
            chain_id: 1,
            rpc_timeout_secs: 10,
            gas_price_multiplier: 1.2,
            max_gas_price_gwei: 500,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Pretty output for terminals, JSON for log shipping.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: PublisherConfig = toml::from_str(
            r#"
            [publisher]
            min_balance = 0.5
            omit_sources = true

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.publisher.min_balance, 0.5);
        assert!(config.publisher.omit_sources);
        assert!(!config.publisher.halt_on_low_balance);
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(config.blockchain.rpc_timeout_secs, 10);
    }

    #[test]
    fn test_default_config() {
        let config = PublisherConfig::default();
        assert_eq!(config.blockchain.chain_id, 1);
        assert_eq!(config.observability.log_level, "info");
        assert!(!config.observability.metrics_enabled);
    }
}
