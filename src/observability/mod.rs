//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Publisher operations produce:
//!     → logging.rs (EventLog: severity + message + optional error)
//!     → timing.rs (Instrumentation spans closed by SpanGuard on drop)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → tracing subscriber (stdout, pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Logging and timing are injected into the publisher as trait objects
//! - Default implementations forward to `tracing` and `metrics`

pub mod logging;
pub mod metrics;
pub mod timing;

pub use logging::{EventLog, Severity, TracingLog};
pub use timing::{Instrumentation, MetricsInstrumentation, SpanGuard, SpanHandle};
