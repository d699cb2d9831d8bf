//! Tierlink Services Layer
//!
//! Business orchestration between the catalog and its storage tiers. The HTTP
//! layer in tierlink-api stays thin: it validates, resolves storages, and hands
//! the request to [`TransferOrchestrator`].

pub mod transfer;

#[cfg(test)]
pub mod test_helpers;

pub use transfer::{TransferOrchestrator, TransferOutcome, TransferPlan};
