//! The transaction client seam.
//!
//! The publisher only needs three things from the network side: a balance, a
//! signed transaction built from records, and a way to send it.
//! `blockchain::StorageTxClient` is the production implementation.

use alloy::primitives::Bytes;
use async_trait::async_trait;

use crate::blockchain::types::BlockchainResult;
use crate::prices::{decode_payload, RecordForPublication};

/// A signed transaction that has not been sent yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedTransaction {
    /// Identifier assigned by the client (transaction hash for EVM chains).
    id: String,
    /// Encoded records carried by the transaction.
    data: Vec<u8>,
    /// Signed, network-encoded transaction.
    raw: Bytes,
}

impl PreparedTransaction {
    pub fn new(id: impl Into<String>, data: Vec<u8>, raw: Bytes) -> Self {
        Self {
            id: id.into(),
            data,
            raw,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn raw(&self) -> &Bytes {
        &self.raw
    }

    /// Decode the records carried in the data field.
    pub fn records(&self) -> Result<Vec<RecordForPublication>, serde_json::Error> {
        decode_payload(&self.data)
    }
}

/// Signs and transmits publication transactions.
#[async_trait]
pub trait TransactionClient: Send + Sync {
    /// Current balance of the signing account, in native units.
    async fn get_balance(&self) -> BlockchainResult<f64>;

    /// Build and sign a transaction carrying `records`.
    async fn prepare_signed_transaction(
        &self,
        records: &[RecordForPublication],
    ) -> BlockchainResult<PreparedTransaction>;

    /// Send a previously prepared transaction.
    async fn transmit(&self, tx: &PreparedTransaction) -> BlockchainResult<()>;
}
