//! Shared-secret authentication for custom-action calls.

use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tierlink_core::models::SHARED_SECRET_HEADER;
use tierlink_core::AppError;

fn secure_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Reject any request whose `x-bz-secret` header does not match the configured secret.
pub async fn shared_secret_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let provided = request
        .headers()
        .get(SHARED_SECRET_HEADER)
        .and_then(|h| h.to_str().ok());

    match provided {
        Some(secret) if secure_compare(secret, &state.config.shared_secret) => {
            next.run(request).await
        }
        Some(_) => HttpAppError(AppError::Unauthorized("Invalid shared secret".to_string()))
            .into_response(),
        None => HttpAppError(AppError::Unauthorized("Missing shared secret".to_string()))
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secure_compare_matches_only_equal_strings() {
        assert!(secure_compare("s3cret", "s3cret"));
        assert!(!secure_compare("s3cret", "s3creT"));
        assert!(!secure_compare("s3cret", "s3cret!"));
        assert!(!secure_compare("", "s3cret"));
    }
}
