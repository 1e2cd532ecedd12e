//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, multiplier >= 1.0)
//! - Check that URLs and addresses parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: PublisherConfig → Result<(), Vec<ValidationError>>

use alloy::primitives::Address;
use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::PublisherConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("publisher.min_balance must be a finite, non-negative number (got {0})")]
    MinBalance(f64),

    #[error("publisher.storage_address is not a valid address: {0}")]
    StorageAddress(String),

    #[error("{field} is not a valid URL: {value}")]
    Url { field: &'static str, value: String },

    #[error("blockchain.rpc_timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("blockchain.gas_price_multiplier must be at least 1.0 (got {0})")]
    GasMultiplier(f64),

    #[error("observability.metrics_address is not a socket address: {0}")]
    MetricsAddress(String),
}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &PublisherConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let min_balance = config.publisher.min_balance;
    if !min_balance.is_finite() || min_balance < 0.0 {
        errors.push(ValidationError::MinBalance(min_balance));
    }

    if config.publisher.storage_address.parse::<Address>().is_err() {
        errors.push(ValidationError::StorageAddress(
            config.publisher.storage_address.clone(),
        ));
    }

    if url::Url::parse(&config.blockchain.rpc_url).is_err() {
        errors.push(ValidationError::Url {
            field: "blockchain.rpc_url",
            value: config.blockchain.rpc_url.clone(),
        });
    }
    for failover in &config.blockchain.failover_urls {
        if url::Url::parse(failover).is_err() {
            errors.push(ValidationError::Url {
                field: "blockchain.failover_urls",
                value: failover.clone(),
            });
        }
    }

    if config.blockchain.rpc_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if !(config.blockchain.gas_price_multiplier >= 1.0) {
        errors.push(ValidationError::GasMultiplier(
            config.blockchain.gas_price_multiplier,
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&PublisherConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = PublisherConfig::default();
        config.publisher.min_balance = -1.0;
        config.publisher.storage_address = "not-an-address".to_string();
        config.blockchain.rpc_timeout_secs = 0;
        config.blockchain.failover_urls.push("::nope".to_string());

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::ZeroTimeout));
        assert!(errors.contains(&ValidationError::MinBalance(-1.0)));
    }

    #[test]
    fn test_nan_values_rejected() {
        let mut config = PublisherConfig::default();
        config.publisher.min_balance = f64::NAN;
        config.blockchain.gas_price_multiplier = f64::NAN;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = PublisherConfig::default();
        config.observability.metrics_address = "nowhere".to_string();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::MetricsAddress("nowhere".to_string())]
        );
    }
}
