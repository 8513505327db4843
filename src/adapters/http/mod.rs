//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter for endpoint exposure.

pub mod communities;
pub mod error;
pub mod problems;
pub mod system;

// Re-export key types for convenience
pub use communities::communities_routes;
pub use communities::CommunitiesHandlers;
pub use error::ErrorResponse;
pub use problems::problems_routes;
pub use problems::ProblemsHandlers;
pub use system::system_routes;
pub use system::SystemHandlers;
