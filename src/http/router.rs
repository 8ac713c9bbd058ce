//! Route definitions.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use super::handler;
use crate::queue::QueueRegistry;

/// Builds the broker's router around a shared registry.
///
/// The queue name is everything after the route prefix and may itself contain `/`.
pub fn create_router(registry: Arc<QueueRegistry>) -> Router {
    Router::new()
        .route("/publish/*queue", post(handler::publish))
        .route(
            "/consume/*queue",
            get(handler::consume)
                .post(handler::consume)
                .head(handler::refuse_head),
        )
        .route("/health", get(handler::health_check))
        // Message size is unconstrained.
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .with_state(registry)
}
