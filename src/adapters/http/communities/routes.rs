//! HTTP routes for community endpoints.

use axum::{routing::get, Router};

use super::handlers::{get_community, get_community_page, CommunitiesHandlers};

/// Creates the communities router with all endpoints.
pub fn communities_routes(handlers: CommunitiesHandlers) -> Router {
    Router::new()
        .route("/:human_id", get(get_community))
        .route("/:human_id/page", get(get_community_page))
        .with_state(handlers)
}
