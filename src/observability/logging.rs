//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber from configuration
//! - Provide the `EventLog` sink the publisher reports through
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - JSON format for production, pretty format for development
//! - `RUST_LOG` overrides the configured level

use std::error::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::schema::{LogFormat, ObservabilityConfig};

/// Initialize the global tracing subscriber.
pub fn init_logging(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("price_publisher={}", config.log_level)));

    let registry = tracing_subscriber::registry().with(filter);
    let result = match config.log_format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).try_init(),
    };

    if let Err(e) = result {
        // A subscriber is already installed (e.g. by a test harness).
        tracing::debug!(error = %e, "Tracing subscriber already initialized");
    }
}

/// Log severity understood by [`EventLog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warn,
    Error,
}

/// Sink for progress messages and absorbed errors.
pub trait EventLog: Send + Sync {
    /// Record a message with an optional error detail.
    fn record(&self, severity: Severity, message: &str, error: Option<&(dyn Error + 'static)>);

    fn info(&self, message: &str) {
        self.record(Severity::Info, message, None);
    }

    fn warn(&self, message: &str) {
        self.record(Severity::Warn, message, None);
    }

    fn error(&self, message: &str, error: &(dyn Error + 'static)) {
        self.record(Severity::Error, message, Some(error));
    }
}

/// [`EventLog`] that forwards to `tracing`, tagged with a component name.
#[derive(Debug, Clone, Copy)]
pub struct TracingLog {
    component: &'static str,
}

impl TracingLog {
    pub fn new(component: &'static str) -> Self {
        Self { component }
    }
}

impl Default for TracingLog {
    fn default() -> Self {
        Self::new("publisher")
    }
}

impl EventLog for TracingLog {
    fn record(&self, severity: Severity, message: &str, error: Option<&(dyn Error + 'static)>) {
        match (severity, error) {
            (Severity::Info, None) => tracing::info!(component = self.component, "{}", message),
            (Severity::Info, Some(e)) => {
                tracing::info!(component = self.component, error = %e, "{}", message)
            }
            (Severity::Warn, None) => tracing::warn!(component = self.component, "{}", message),
            (Severity::Warn, Some(e)) => {
                tracing::warn!(component = self.component, error = %e, "{}", message)
            }
            (Severity::Error, None) => tracing::error!(component = self.component, "{}", message),
            (Severity::Error, Some(e)) => {
                tracing::error!(component = self.component, error = %e, "{}", message)
            }
        }
    }
}
