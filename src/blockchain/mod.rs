//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Environment variable (private key), config (RPC URLs, storage address)
//!     → wallet.rs (key loading, signing)
//!     → client.rs (RPC connection with timeouts and failover)
//!     → transaction.rs (nonce, gas, sign)
//!     → storage.rs (TransactionClient: balance, prepare, transmit)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts

pub mod client;
pub mod storage;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use client::BlockchainClient;
pub use storage::StorageTxClient;
pub use types::{BlockchainConfig, BlockchainError, BlockchainResult, ChainId};
pub use wallet::Wallet;
