//! Transaction building and signing.
//!
//! # Responsibilities
//! - Sync the wallet nonce from chain
//! - Price gas with a ceiling and safety multiplier
//! - Size the gas limit for data-carrying transactions
//! - Sign into a network-encoded envelope

use alloy::consensus::TxEnvelope;
use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, U256};
use alloy::rpc::types::TransactionRequest;

use crate::blockchain::client::BlockchainClient;
use crate::blockchain::types::{BlockchainError, BlockchainResult};
use crate::blockchain::wallet::Wallet;

const BASE_GAS: u64 = 21_000;
/// Calldata floor price per token (EIP-7623); a non-zero byte is four tokens.
const FLOOR_GAS_PER_TOKEN: u64 = 10;

/// Gas limit that covers both the standard and the floor calldata cost.
pub fn data_gas_limit(data: &[u8]) -> u64 {
    let tokens: u64 = data.iter().map(|b| if *b == 0 { 1 } else { 4 }).sum();
    BASE_GAS + tokens * FLOOR_GAS_PER_TOKEN
}

/// Transaction builder for data-carrying transfers.
#[derive(Debug, Clone)]
pub struct TxBuilder {
    client: BlockchainClient,
    wallet: Wallet,
}

impl TxBuilder {
    pub fn new(client: BlockchainClient, wallet: Wallet) -> Self {
        Self { client, wallet }
    }

    /// Build a zero-value transaction request carrying `data` to `to`.
    pub async fn build(&self, to: Address, data: Bytes) -> BlockchainResult<TransactionRequest> {
        let chain_nonce = self.client.get_transaction_count(self.wallet.address()).await?;
        self.wallet.set_nonce(chain_nonce);

        let gas_price = self.client.get_gas_price().await?;
        let gas_price_gwei = gas_price / 1_000_000_000;

        let config = self.client.config();
        if gas_price_gwei > config.max_gas_price_gwei as u128 {
            return Err(BlockchainError::GasPriceTooHigh {
                current_gwei: gas_price_gwei as u64,
                max_gwei: config.max_gas_price_gwei,
            });
        }

        let adjusted_gas_price = (gas_price as f64 * config.gas_price_multiplier) as u128;
        let nonce = self.wallet.get_and_increment_nonce();
        let gas_limit = data_gas_limit(&data);

        tracing::debug!(
            nonce,
            gas_price = adjusted_gas_price,
            gas_limit,
            data_len = data.len(),
            "Built storage transaction request"
        );

        Ok(TransactionRequest::default()
            .with_from(self.wallet.address())
            .with_to(to)
            .with_value(U256::ZERO)
            .with_input(data)
            .with_nonce(nonce)
            .with_gas_price(adjusted_gas_price)
            .with_chain_id(self.wallet.chain_id())
            .with_gas_limit(gas_limit))
    }

    /// Build and sign a transaction carrying `data` to `to`.
    pub async fn build_signed(&self, to: Address, data: Bytes) -> BlockchainResult<TxEnvelope> {
        let request = self.build(to, data).await?;
        self.wallet.sign_transaction(request).await
    }

    pub fn client(&self) -> &BlockchainClient {
        &self.client
    }

    pub fn wallet(&self) -> &Wallet {
        &self.wallet
    }

    pub fn address(&self) -> Address {
        self.wallet.address()
    }
}
