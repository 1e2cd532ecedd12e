//! Price record types and payload encoding.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Per-source evidence attached to an aggregated price, keyed by source name.
pub type Sources = BTreeMap<String, Value>;

/// One aggregated price observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    /// Unique identifier assigned by the aggregator.
    pub id: String,
    /// Asset symbol (e.g. "BTC").
    pub symbol: String,
    /// Which upstream feeds contributed to the value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Sources>,
    /// Observation time in milliseconds since the epoch.
    pub timestamp: i64,
    /// Schema version of the record.
    pub version: String,
    /// Aggregated value, numeric or structured.
    pub value: Value,
}

/// A price record in the shape that is written into a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordForPublication {
    pub id: String,
    pub symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Sources>,
    pub timestamp: i64,
    pub version: String,
    pub value: Value,
}

impl From<&PriceRecord> for RecordForPublication {
    fn from(record: &PriceRecord) -> Self {
        Self {
            id: record.id.clone(),
            symbol: record.symbol.clone(),
            source: record.source.clone(),
            timestamp: record.timestamp,
            version: record.version.clone(),
            value: record.value.clone(),
        }
    }
}

/// Encode records as the JSON array carried in a transaction's data field.
pub fn encode_payload(records: &[RecordForPublication]) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(records)
}

/// Decode a payload produced by [`encode_payload`].
pub fn decode_payload(data: &[u8]) -> Result<Vec<RecordForPublication>, serde_json::Error> {
    serde_json::from_slice(data)
}
