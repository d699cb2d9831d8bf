//! Tierlink Infrastructure Library
//!
//! Shared infrastructure for the tierlink binaries:
//! - Middleware (request ID)
//! - Telemetry initialization (tracing-subscriber, compact or JSON output)

pub mod middleware;
pub mod telemetry;

// Re-export commonly used types
pub use middleware::{request_id_middleware, RequestId, REQUEST_ID_HEADER};
pub use telemetry::init_telemetry;
