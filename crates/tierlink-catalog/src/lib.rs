//! HTTP client for the catalog service.
//!
//! Provides [`CatalogClient`] with the catalog's App-ID/Auth-Token header auth,
//! generic GET/POST/DELETE helpers with `next_url` pagination, and the
//! [`CatalogApi`] trait the transfer orchestrator is written against.

pub mod api;
pub mod client;
pub mod error;

pub use api::CatalogApi;
pub use client::{build_http_client, CatalogClient, ASSETS_PATH, FILES_PATH, JOBS_PATH};
pub use error::{CatalogError, CatalogResult};
