//! Shared test doubles for publisher integration tests.

use alloy::primitives::Bytes;
use async_trait::async_trait;
use price_publisher::blockchain::{BlockchainError, BlockchainResult};
use price_publisher::observability::{EventLog, Instrumentation, Severity, SpanHandle};
use price_publisher::prices::{encode_payload, RecordForPublication, Sources};
use price_publisher::{PreparedTransaction, PriceRecord, TransactionClient};
use serde_json::{json, Value};
use std::error::Error;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;

/// Scripted transaction client that counts calls.
#[derive(Default)]
pub struct MockClient {
    pub balance: f64,
    pub fail_balance: bool,
    pub fail_sign: bool,
    pub fail_transmit: bool,
    pub balance_calls: AtomicUsize,
    pub sign_calls: AtomicUsize,
    pub transmit_calls: AtomicUsize,
    pub signed: Mutex<Vec<Vec<RecordForPublication>>>,
}

impl MockClient {
    pub fn with_balance(balance: f64) -> Self {
        Self {
            balance,
            ..Self::default()
        }
    }
}

#[async_trait]
impl TransactionClient for MockClient {
    async fn get_balance(&self) -> BlockchainResult<f64> {
        self.balance_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_balance {
            return Err(BlockchainError::Rpc("connection refused".into()));
        }
        Ok(self.balance)
    }

    async fn prepare_signed_transaction(
        &self,
        records: &[RecordForPublication],
    ) -> BlockchainResult<PreparedTransaction> {
        let n = self.sign_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_sign {
            return Err(BlockchainError::Wallet("Transaction signing failed: no key".into()));
        }
        self.signed.lock().unwrap().push(records.to_vec());
        let data = encode_payload(records)
            .map_err(|e| BlockchainError::Serialization(e.to_string()))?;
        Ok(PreparedTransaction::new(
            format!("0xmock{}", n),
            data,
            Bytes::from_static(b"signed"),
        ))
    }

    async fn transmit(&self, _tx: &PreparedTransaction) -> BlockchainResult<()> {
        self.transmit_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_transmit {
            return Err(BlockchainError::Timeout(10));
        }
        Ok(())
    }
}

/// Log sink that keeps every entry.
#[derive(Default)]
pub struct RecordingLog {
    pub entries: Mutex<Vec<(Severity, String, Option<String>)>>,
}

impl RecordingLog {
    pub fn errors(&self) -> Vec<(String, Option<String>)> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|(severity, _, _)| *severity == Severity::Error)
            .map(|(_, message, error)| (message.clone(), error.clone()))
            .collect()
    }

    pub fn messages(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .map(|(_, message, _)| message.clone())
            .collect()
    }
}

impl EventLog for RecordingLog {
    fn record(&self, severity: Severity, message: &str, error: Option<&(dyn Error + 'static)>) {
        self.entries
            .lock()
            .unwrap()
            .push((severity, message.to_string(), error.map(|e| e.to_string())));
    }
}

/// Instrumentation that remembers which spans were opened and closed.
#[derive(Default)]
pub struct RecordingInstrumentation {
    next: AtomicU64,
    pub started: Mutex<Vec<&'static str>>,
    pub ended: Mutex<Vec<&'static str>>,
}

impl Instrumentation for RecordingInstrumentation {
    fn span_start(&self, label: &'static str) -> SpanHandle {
        self.started.lock().unwrap().push(label);
        SpanHandle::new(self.next.fetch_add(1, Ordering::SeqCst), label)
    }

    fn span_end(&self, handle: SpanHandle) {
        self.ended.lock().unwrap().push(handle.label());
    }
}

pub fn price(symbol: &str, timestamp: i64, value: Value) -> PriceRecord {
    PriceRecord {
        id: format!("{}-{}", symbol.to_lowercase(), timestamp),
        symbol: symbol.to_string(),
        source: None,
        timestamp,
        version: "0.4".to_string(),
        value,
    }
}

pub fn price_with_sources(symbol: &str, timestamp: i64, value: Value) -> PriceRecord {
    let mut source = Sources::new();
    source.insert("coingecko".to_string(), json!({ "value": value.clone(), "ok": true }));
    PriceRecord {
        source: Some(source),
        ..price(symbol, timestamp, value)
    }
}
