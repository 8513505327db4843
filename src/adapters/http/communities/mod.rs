//! HTTP adapter for community endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{community_payload_json, CommunityParams};
pub use handlers::CommunitiesHandlers;
pub use routes::communities_routes;
