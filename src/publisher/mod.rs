//! Publication orchestration.
//!
//! # Data Flow
//! ```text
//! caller
//!     → Publisher::check_balance (advisory gate, never fails)
//!     → Publisher::prepare (validate → redact → client signs)   errors propagate
//!     → caller holds PreparedTransaction
//!     → Publisher::upload (client transmits)                     errors absorbed
//! ```
//!
//! # Design Decisions
//! - Propagated failures are typed (`PublishError`); absorbed failures only
//!   reach the injected `EventLog`
//! - The network side sits behind the `TransactionClient` trait

pub mod balance;
pub mod client;
pub mod error;
pub mod orchestrator;

pub use balance::BalanceSnapshot;
pub use client::{PreparedTransaction, TransactionClient};
pub use error::{PublishError, PublishResult};
pub use orchestrator::Publisher;
