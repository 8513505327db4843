//! HTTP routes for system endpoints.

use axum::{routing::get, Router};

use super::handlers::{get_stats, health, SystemHandlers};

/// Creates the system router with health and stats endpoints.
pub fn system_routes(handlers: SystemHandlers) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stats", get(get_stats))
        .with_state(handlers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_routes_compiles() {
        // This test just ensures the route definitions compile correctly
        // Actual HTTP testing would require integration tests
    }
}
