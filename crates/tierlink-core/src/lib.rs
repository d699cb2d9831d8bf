//! Tierlink Core Library
//!
//! This crate provides the domain models, error types, configuration and format-list
//! helpers shared by the catalog client, the transfer orchestrator, the webhook
//! server and the custom-action CLI.

pub mod config;
pub mod error;
pub mod formats;
pub mod models;

// Re-export commonly used types
pub use config::{Config, LogFormat};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use formats::{normalize_formats, parse_format_names};
