//! Operation timing.
//!
//! # Responsibilities
//! - Open a named span when an operation starts
//! - Close it exactly once, whichever way the operation exits
//!
//! # Design Decisions
//! - `SpanGuard` ends the span in `Drop`, so `?` and early returns still close it
//! - Instrumentation is assumed infallible

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use crate::observability::metrics;

/// An open timing span.
#[derive(Debug)]
pub struct SpanHandle {
    id: u64,
    label: &'static str,
    started: Instant,
}

impl SpanHandle {
    pub fn new(id: u64, label: &'static str) -> Self {
        Self {
            id,
            label,
            started: Instant::now(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// Timing collaborator used around publisher operations.
pub trait Instrumentation: Send + Sync {
    fn span_start(&self, label: &'static str) -> SpanHandle;

    fn span_end(&self, handle: SpanHandle);
}

impl dyn Instrumentation + '_ {
    /// Start a span that ends when the returned guard is dropped.
    pub fn track(&self, label: &'static str) -> SpanGuard<'_> {
        SpanGuard {
            instrumentation: self,
            handle: Some(self.span_start(label)),
        }
    }
}

/// Ends its span on drop.
#[must_use = "the span ends as soon as the guard is dropped"]
pub struct SpanGuard<'a> {
    instrumentation: &'a dyn Instrumentation,
    handle: Option<SpanHandle>,
}

impl Drop for SpanGuard<'_> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.instrumentation.span_end(handle);
        }
    }
}

/// Records span durations as Prometheus histograms.
#[derive(Debug, Default)]
pub struct MetricsInstrumentation {
    next_id: AtomicU64,
}

impl MetricsInstrumentation {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Instrumentation for MetricsInstrumentation {
    fn span_start(&self, label: &'static str) -> SpanHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(span_id = id, operation = label, "Span started");
        SpanHandle::new(id, label)
    }

    fn span_end(&self, handle: SpanHandle) {
        let elapsed = handle.elapsed();
        metrics::record_operation_duration(handle.label(), elapsed);
        tracing::debug!(
            span_id = handle.id(),
            operation = handle.label(),
            elapsed_ms = elapsed.as_millis() as u64,
            "Span finished"
        );
    }
}
