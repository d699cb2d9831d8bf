use crate::auth::shared_secret_middleware;
use crate::handlers::action::handle_action;
use crate::state::AppState;
use axum::Router;
use std::sync::Arc;
use tierlink_infra::request_id_middleware;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Custom-action payloads are small id lists.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Setup all application routes
///
/// There are no public routes: every path reaches the action pipeline behind the
/// shared secret, and the handler decides between 405, 400, 500 and 404.
pub fn setup_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .fallback(handle_action)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            shared_secret_middleware,
        ))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES)),
        )
        .with_state(state)
}
