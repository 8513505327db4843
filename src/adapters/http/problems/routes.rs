//! HTTP routes for problem endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::{
    add_rated_connection, connect_problems, create_problem, get_problem, list_problems,
    rate_connection, update_problem, ProblemsHandlers,
};

/// Creates the problems router with all endpoints.
pub fn problems_routes(handlers: ProblemsHandlers) -> Router {
    Router::new()
        .route("/", get(list_problems))
        .route("/", post(create_problem))
        .route("/connections", post(connect_problems))
        .route("/connection_ratings", post(rate_connection))
        .route("/rated_connections", post(add_rated_connection))
        .route("/:human_id", get(get_problem))
        .route("/:human_id", put(update_problem))
        .with_state(handlers)
}
