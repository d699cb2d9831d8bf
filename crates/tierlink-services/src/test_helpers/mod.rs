//! Test helpers for orchestrator unit tests
//!
//! Provides an in-memory [`CatalogApi`] so copy/delete flows and the job polling
//! state machine can be exercised without an HTTP server.

mod fake_catalog;

pub use fake_catalog::{BulkCall, FakeCatalog, FakeCatalogCall};
