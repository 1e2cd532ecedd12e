//! Publication workflow.
//!
//! # Responsibilities
//! - Report the signing account's balance without ever failing
//! - Validate, redact and sign a price batch (errors propagate)
//! - Transmit a prepared transaction (errors are logged and absorbed)
//!
//! # Design Decisions
//! - Holds only immutable configuration and collaborator handles, so `&self`
//!   methods can run concurrently
//! - Every prepare/upload is bracketed by a timing span closed on drop
//! - No retries; a failed cycle is repeated by the caller with fresh data

use std::sync::Arc;

use crate::observability::metrics;
use crate::observability::{EventLog, Instrumentation, MetricsInstrumentation, TracingLog};
use crate::prices::{redact, validate, PriceRecord};
use crate::publisher::balance::BalanceSnapshot;
use crate::publisher::client::{PreparedTransaction, TransactionClient};
use crate::publisher::error::PublishResult;

/// Span label for transaction preparation.
pub const PREPARE_SPAN: &str = "transaction-preparing";
/// Span label for transaction upload.
pub const UPLOAD_SPAN: &str = "keeping";

/// Gates, prepares and uploads price batches through a [`TransactionClient`].
pub struct Publisher<C> {
    client: C,
    min_balance: f64,
    log: Arc<dyn EventLog>,
    instrumentation: Arc<dyn Instrumentation>,
}

impl<C: TransactionClient> Publisher<C> {
    /// Create a publisher that logs through `tracing` and times with `metrics`.
    pub fn new(client: C, min_balance: f64) -> Self {
        Self {
            client,
            min_balance,
            log: Arc::new(TracingLog::new("publisher")),
            instrumentation: Arc::new(MetricsInstrumentation::new()),
        }
    }

    /// Replace the log sink.
    pub fn with_log(mut self, log: Arc<dyn EventLog>) -> Self {
        self.log = log;
        self
    }

    /// Replace the timing collaborator.
    pub fn with_instrumentation(mut self, instrumentation: Arc<dyn Instrumentation>) -> Self {
        self.instrumentation = instrumentation;
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn min_balance(&self) -> f64 {
        self.min_balance
    }

    /// Read the current balance and compare it to the minimum.
    ///
    /// A failed query is logged and reported as a zero, low balance.
    pub async fn check_balance(&self) -> BalanceSnapshot {
        match self.client.get_balance().await {
            Ok(balance) => {
                self.log.info(&format!("Balance on storage network: {}", balance));
                metrics::record_balance(balance);
                metrics::record_balance_check("ok");
                BalanceSnapshot::from_balance(balance, self.min_balance)
            }
            Err(e) => {
                self.log.error("Error while checking storage network balance", &e);
                metrics::record_balance_check("error");
                BalanceSnapshot::unknown()
            }
        }
    }

    /// Validate `prices`, optionally drop their sources, and sign a transaction.
    ///
    /// Validation and signing errors are returned to the caller; the client is
    /// never contacted for an invalid batch.
    pub async fn prepare(
        &self,
        prices: &[PriceRecord],
        omit_sources: bool,
    ) -> PublishResult<PreparedTransaction> {
        let _span = self.instrumentation.track(PREPARE_SPAN);

        self.log.info("Keeping prices on storage network - preparing transaction");
        validate(prices)?;

        let records = redact(prices, omit_sources);
        let tx = self.client.prepare_signed_transaction(&records).await?;

        Ok(tx)
    }

    /// Send a prepared transaction. Failures are logged, never returned.
    pub async fn upload(&self, tx: &PreparedTransaction) {
        self.log.info(&format!(
            "Keeping data on storage network - posting transaction {}",
            tx.id()
        ));
        let _span = self.instrumentation.track(UPLOAD_SPAN);

        match self.client.transmit(tx).await {
            Ok(()) => {
                self.log.info(&format!("Transaction posted: {}", tx.id()));
                metrics::record_upload("ok");
            }
            Err(e) => {
                self.log.error("Error while storing data points on storage network", &e);
                metrics::record_upload("error");
            }
        }
    }
}
