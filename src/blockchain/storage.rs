//! `TransactionClient` backed by an EVM chain.
//!
//! Records are stored as calldata of a zero-value transaction sent to the
//! configured storage address. The transaction hash is the publication id.

use alloy::eips::eip2718::Encodable2718;
use alloy::primitives::utils::format_ether;
use alloy::primitives::{Address, Bytes};
use async_trait::async_trait;

use crate::blockchain::client::BlockchainClient;
use crate::blockchain::transaction::TxBuilder;
use crate::blockchain::types::{BlockchainError, BlockchainResult};
use crate::blockchain::wallet::Wallet;
use crate::prices::{encode_payload, RecordForPublication};
use crate::publisher::client::{PreparedTransaction, TransactionClient};

/// Publishes price payloads as data-carrying transactions.
#[derive(Debug, Clone)]
pub struct StorageTxClient {
    builder: TxBuilder,
    storage_address: Address,
}

impl StorageTxClient {
    pub fn new(client: BlockchainClient, wallet: Wallet, storage_address: Address) -> Self {
        Self {
            builder: TxBuilder::new(client, wallet),
            storage_address,
        }
    }

    pub fn storage_address(&self) -> Address {
        self.storage_address
    }

    pub fn address(&self) -> Address {
        self.builder.address()
    }
}

#[async_trait]
impl TransactionClient for StorageTxClient {
    async fn get_balance(&self) -> BlockchainResult<f64> {
        let wei = self.builder.client().get_balance(self.address()).await?;
        let ether = format_ether(wei);
        ether
            .parse::<f64>()
            .map_err(|e| BlockchainError::Rpc(format!("Unreadable balance '{}': {}", ether, e)))
    }

    async fn prepare_signed_transaction(
        &self,
        records: &[RecordForPublication],
    ) -> BlockchainResult<PreparedTransaction> {
        let data = encode_payload(records)
            .map_err(|e| BlockchainError::Serialization(e.to_string()))?;

        let envelope = self
            .builder
            .build_signed(self.storage_address, Bytes::from(data.clone()))
            .await?;
        let id = envelope.tx_hash().to_string();

        tracing::debug!(
            tx_hash = %id,
            records = records.len(),
            data_len = data.len(),
            "Signed storage transaction"
        );

        Ok(PreparedTransaction::new(
            id,
            data,
            Bytes::from(envelope.encoded_2718()),
        ))
    }

    async fn transmit(&self, tx: &PreparedTransaction) -> BlockchainResult<()> {
        let hash = self.builder.client().send_raw_transaction(tx.raw()).await?;
        tracing::debug!(tx_hash = %hash, "Raw transaction accepted by RPC");
        Ok(())
    }
}
