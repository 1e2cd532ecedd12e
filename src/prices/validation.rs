//! Batch consistency checks.
//!
//! # Responsibilities
//! - Reject empty batches
//! - Reject batches that mix timestamps
//!
//! # Design Decisions
//! - Rules run in order; the first violation is returned
//! - Pure function: &[PriceRecord] → Result<(), BatchError>

use std::collections::HashSet;
use thiserror::Error;

use crate::prices::types::PriceRecord;

/// A batch that cannot be published.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BatchError {
    /// The batch has no records.
    #[error("Cannot publish an empty batch of prices")]
    EmptyBatch,

    /// Records in the batch carry more than one timestamp.
    #[error("All prices should have the same timestamp, found {count} different timestamps")]
    InconsistentTimestamps { count: usize },
}

/// Check that a batch is non-empty and shares exactly one timestamp.
pub fn validate(prices: &[PriceRecord]) -> Result<(), BatchError> {
    if prices.is_empty() {
        return Err(BatchError::EmptyBatch);
    }

    let timestamps: HashSet<i64> = prices.iter().map(|price| price.timestamp).collect();
    if timestamps.len() != 1 {
        return Err(BatchError::InconsistentTimestamps {
            count: timestamps.len(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn price(symbol: &str, timestamp: i64) -> PriceRecord {
        PriceRecord {
            id: format!("{}-{}", symbol, timestamp),
            symbol: symbol.to_string(),
            source: None,
            timestamp,
            version: "0.4".to_string(),
            value: json!(1.0),
        }
    }

    #[test]
    fn test_single_timestamp_passes() {
        let batch = vec![price("BTC", 1000), price("ETH", 1000), price("AR", 1000)];
        assert_eq!(validate(&batch), Ok(()));
    }

    #[test]
    fn test_single_record_passes() {
        assert_eq!(validate(&[price("BTC", 5)]), Ok(()));
    }

    #[test]
    fn test_empty_batch() {
        assert_eq!(validate(&[]), Err(BatchError::EmptyBatch));
    }

    #[test]
    fn test_counts_distinct_timestamps() {
        let batch = vec![
            price("BTC", 1000),
            price("ETH", 1001),
            price("AR", 1002),
            price("SOL", 1001),
        ];
        let err = validate(&batch).unwrap_err();
        assert_eq!(err, BatchError::InconsistentTimestamps { count: 3 });
        assert!(err.to_string().contains("found 3 different timestamps"));
    }
}
