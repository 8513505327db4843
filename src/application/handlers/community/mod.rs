//! Community command and query handlers.

mod add_rated_connection;
mod get_community_payload;

pub use add_rated_connection::{
    AddRatedConnectionCommand, AddRatedConnectionHandler, AddRatedConnectionResult,
};
pub use get_community_payload::{
    CommunityPayload, CommunityPayloadEntry, GetCommunityPayloadHandler, GetCommunityPayloadQuery,
};
