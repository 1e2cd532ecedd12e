//! Price batch publisher.
//!
//! Gates, validates, signs and uploads batches of aggregated prices to a
//! blockchain-backed storage network.

pub mod blockchain;
pub mod config;
pub mod observability;
pub mod prices;
pub mod publisher;

pub use config::PublisherConfig;
pub use prices::PriceRecord;
pub use publisher::{BalanceSnapshot, PreparedTransaction, PublishError, Publisher, TransactionClient};
