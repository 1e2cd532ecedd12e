//! Source redaction before signing.

use crate::prices::types::{PriceRecord, RecordForPublication};

/// Build the publication payload for a batch.
///
/// With `omit_sources` set, every returned record has `source: None`; all other
/// fields are copied unchanged. The input records are only borrowed.
pub fn redact(prices: &[PriceRecord], omit_sources: bool) -> Vec<RecordForPublication> {
    prices
        .iter()
        .map(|price| {
            let mut record = RecordForPublication::from(price);
            if omit_sources {
                record.source = None;
            }
            record
        })
        .collect()
}
