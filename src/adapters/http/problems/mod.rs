//! HTTP adapter for problem endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AddRatedConnectionRequest, ConnectProblemsRequest, ConnectProblemsResponse,
    ConnectionSummaryResponse, ListProblemsResponse, ProblemCommandResponse, ProblemResponse,
    ProblemSummaryResponse, RateConnectionRequest, RateConnectionResponse,
};
pub use handlers::ProblemsHandlers;
pub use routes::problems_routes;
