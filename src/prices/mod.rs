//! Price batch handling.
//!
//! # Data Flow
//! ```text
//! Aggregated prices (caller-owned &[PriceRecord])
//!     → validation.rs (non-empty, single shared timestamp)
//!     → redact.rs (optional source removal, new values only)
//!     → types.rs (JSON payload for the transaction data field)
//! ```
//!
//! # Design Decisions
//! - Batches are borrowed slices; nothing in here mutates caller data
//! - Validation is pure and performs no I/O

pub mod redact;
pub mod types;
pub mod validation;

pub use redact::redact;
pub use types::{decode_payload, encode_payload, PriceRecord, RecordForPublication, Sources};
pub use validation::{validate, BatchError};
