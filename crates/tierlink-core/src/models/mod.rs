//! Data models for the application
//!
//! `action` holds the inbound custom-action payload, `catalog` the records
//! returned by the catalog REST API, `custom_action` the registration records
//! managed by the CLI.

mod action;
mod catalog;
mod custom_action;

pub use action::*;
pub use catalog::*;
pub use custom_action::*;
