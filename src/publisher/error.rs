//! Errors surfaced by `Publisher::prepare`.

use thiserror::Error;

use crate::blockchain::types::BlockchainError;
use crate::prices::BatchError;

/// Failure to prepare a publication transaction.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The batch failed validation; fix the data and call again.
    #[error(transparent)]
    Batch(#[from] BatchError),

    /// The client could not build or sign the transaction.
    #[error(transparent)]
    Client(#[from] BlockchainError),
}

pub type PublishResult<T> = Result<T, PublishError>;
