//! # concierge-observability
//!
//! Structured tracing setup and query-performance logging.

pub mod query_log;
pub mod spans;
pub mod tracing_setup;

pub use query_log::{QueryLog, QueryLogEntry};
pub use tracing_setup::{init_tracing, init_tracing_with_filter};
