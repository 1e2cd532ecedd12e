//! End-to-end publication cycle tests against a scripted client.

use price_publisher::prices::{redact, validate, BatchError};
use price_publisher::publisher::orchestrator::{PREPARE_SPAN, UPLOAD_SPAN};
use price_publisher::{BalanceSnapshot, PublishError, Publisher};
use serde_json::json;
use std::sync::atomic::Ordering;
use std::sync::Arc;

mod common;

use common::{price, price_with_sources, MockClient, RecordingInstrumentation, RecordingLog};

fn publisher(
    client: MockClient,
    min_balance: f64,
) -> (
    Publisher<MockClient>,
    Arc<RecordingLog>,
    Arc<RecordingInstrumentation>,
) {
    let log = Arc::new(RecordingLog::default());
    let spans = Arc::new(RecordingInstrumentation::default());
    let publisher = Publisher::new(client, min_balance)
        .with_log(log.clone())
        .with_instrumentation(spans.clone());
    (publisher, log, spans)
}

#[tokio::test]
async fn test_low_balance_reported() {
    let (publisher, log, _) = publisher(MockClient::with_balance(0.01), 0.05);

    let snapshot = publisher.check_balance().await;

    assert_eq!(
        snapshot,
        BalanceSnapshot {
            balance: 0.01,
            is_balance_low: true
        }
    );
    assert!(log.messages().iter().any(|m| m.contains("0.01")));
    assert!(log.errors().is_empty());
}

#[tokio::test]
async fn test_sufficient_balance() {
    let (publisher, _, _) = publisher(MockClient::with_balance(3.0), 0.05);
    let snapshot = publisher.check_balance().await;
    assert_eq!(snapshot.balance, 3.0);
    assert!(!snapshot.is_balance_low);
}

#[tokio::test]
async fn test_balance_failure_is_absorbed() {
    let client = MockClient {
        fail_balance: true,
        balance: 10.0,
        ..MockClient::default()
    };
    let (publisher, log, _) = publisher(client, 0.05);

    let snapshot = publisher.check_balance().await;

    assert_eq!(snapshot, BalanceSnapshot::unknown());
    let errors = log.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].1.as_deref().unwrap().contains("connection refused"));
}

#[tokio::test]
async fn test_balance_is_requeried_each_time() {
    let (publisher, _, _) = publisher(MockClient::with_balance(1.0), 0.05);
    publisher.check_balance().await;
    publisher.check_balance().await;
    assert_eq!(publisher.client().balance_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_prepare_omits_sources() {
    let batch = vec![
        price_with_sources("BTC", 1000, json!(42000.5)),
        price("ETH", 1000, json!(2300)),
        price("AR", 1000, json!({ "bid": 7.1, "ask": 7.2 })),
    ];
    let before = batch.clone();
    let (publisher, _, spans) = publisher(MockClient::with_balance(1.0), 0.05);

    let tx = publisher.prepare(&batch, true).await.unwrap();

    let records = tx.records().unwrap();
    assert_eq!(records.len(), 3);
    for (record, original) in records.iter().zip(&before) {
        assert!(record.source.is_none());
        assert_eq!(record.id, original.id);
        assert_eq!(record.symbol, original.symbol);
        assert_eq!(record.timestamp, original.timestamp);
        assert_eq!(record.version, original.version);
        assert_eq!(record.value, original.value);
    }
    assert_eq!(batch, before);
    assert_eq!(*publisher.client().signed.lock().unwrap(), vec![records]);
    assert_eq!(*spans.ended.lock().unwrap(), vec![PREPARE_SPAN]);
}

#[tokio::test]
async fn test_prepare_keeps_sources_by_default() {
    let batch = vec![price_with_sources("BTC", 1000, json!(1))];
    let (publisher, _, _) = publisher(MockClient::with_balance(1.0), 0.05);

    let tx = publisher.prepare(&batch, false).await.unwrap();

    assert_eq!(tx.records().unwrap(), redact(&batch, false));
    assert!(tx.records().unwrap()[0].source.is_some());
}

#[tokio::test]
async fn test_mixed_timestamps_rejected_before_client() {
    let batch = vec![price("BTC", 1000, json!(1)), price("ETH", 1001, json!(2))];
    let (publisher, _, spans) = publisher(MockClient::with_balance(1.0), 0.05);

    let err = publisher.prepare(&batch, false).await.unwrap_err();

    assert!(matches!(
        err,
        PublishError::Batch(BatchError::InconsistentTimestamps { count: 2 })
    ));
    assert!(err.to_string().contains("found 2 different timestamps"));
    assert_eq!(publisher.client().sign_calls.load(Ordering::SeqCst), 0);
    assert_eq!(*spans.started.lock().unwrap(), vec![PREPARE_SPAN]);
    assert_eq!(*spans.ended.lock().unwrap(), vec![PREPARE_SPAN]);
}

#[tokio::test]
async fn test_empty_batch_rejected() {
    let (publisher, _, spans) = publisher(MockClient::with_balance(1.0), 0.05);
    let err = publisher.prepare(&[], true).await.unwrap_err();
    assert!(matches!(err, PublishError::Batch(BatchError::EmptyBatch)));
    assert_eq!(spans.ended.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_signing_failure_propagates() {
    let client = MockClient {
        fail_sign: true,
        ..MockClient::default()
    };
    let (publisher, log, spans) = publisher(client, 0.05);

    let err = publisher
        .prepare(&[price("BTC", 1000, json!(1))], false)
        .await
        .unwrap_err();

    assert!(matches!(err, PublishError::Client(_)));
    assert_eq!(err.to_string(), "Wallet error: Transaction signing failed: no key");
    assert!(log.errors().is_empty());
    assert_eq!(*spans.ended.lock().unwrap(), vec![PREPARE_SPAN]);
}

#[tokio::test]
async fn test_upload_failure_is_absorbed() {
    let client = MockClient {
        fail_transmit: true,
        ..MockClient::default()
    };
    let (publisher, log, spans) = publisher(client, 0.05);
    let tx = publisher
        .prepare(&[price("BTC", 1000, json!(1))], false)
        .await
        .unwrap();

    publisher.upload(&tx).await;

    assert_eq!(publisher.client().transmit_calls.load(Ordering::SeqCst), 1);
    let errors = log.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].1.as_deref(), Some("RPC timeout after 10 seconds"));
    assert!(!log.messages().iter().any(|m| m.starts_with("Transaction posted")));
    assert_eq!(*spans.ended.lock().unwrap(), vec![PREPARE_SPAN, UPLOAD_SPAN]);
}

#[tokio::test]
async fn test_full_cycle() {
    let (publisher, log, _) = publisher(MockClient::with_balance(1.0), 0.05);
    let batch = vec![price("BTC", 5000, json!(1)), price("ETH", 5000, json!(2))];

    assert!(!publisher.check_balance().await.is_balance_low);
    let tx = publisher.prepare(&batch, false).await.unwrap();
    publisher.upload(&tx).await;

    assert_eq!(publisher.client().transmit_calls.load(Ordering::SeqCst), 1);
    assert!(log
        .messages()
        .contains(&format!("Transaction posted: {}", tx.id())));
    assert!(log.errors().is_empty());
}

#[test]
fn test_validate_reports_distinct_count() {
    let batch: Vec<_> = (0..5).map(|i| price("BTC", 1000 + i % 4, json!(i))).collect();
    assert_eq!(
        validate(&batch),
        Err(BatchError::InconsistentTimestamps { count: 4 })
    );
}
