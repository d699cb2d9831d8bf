//! Telemetry initialization
//!
//! Structured logging through `tracing`, rendered either compact (human readable)
//! or as JSON lines for log shippers.

mod init;

pub use init::{init_telemetry, DEFAULT_LOG_FILTER};
