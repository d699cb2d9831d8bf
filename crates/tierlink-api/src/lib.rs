//! Tierlink API Library
//!
//! HTTP receiver for catalog custom actions: handlers, shared-secret middleware,
//! error rendering and application setup.

mod handlers;

pub mod auth;
pub mod error;
pub mod setup;
pub mod state;

pub use error::HttpAppError;
pub use state::AppState;
