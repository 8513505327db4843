//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

pub mod handlers;

pub use handlers::{
    // Problem handlers
    problem::{
        ConnectionSummary, CreateProblemCommand, CreateProblemHandler, GetProblemHandler,
        GetProblemQuery, GetProblemResult, ListProblemsHandler, UpdateProblemCommand,
        UpdateProblemHandler, UpsertProblemCommand, UpsertProblemHandler, UpsertProblemResult,
    },
    // Connection handlers
    connection::{ConnectProblemsCommand, ConnectProblemsHandler, ConnectProblemsResult},
    // Rating handlers
    rating::{RateConnectionCommand, RateConnectionHandler, RateConnectionResult},
    // Community handlers
    community::{
        AddRatedConnectionCommand, AddRatedConnectionHandler, AddRatedConnectionResult,
        CommunityPayload, CommunityPayloadEntry, GetCommunityPayloadHandler,
        GetCommunityPayloadQuery,
    },
    // Data handlers
    data::{LoadDataCommand, LoadDataHandler, LoadDataResult},
    // Statistics handlers
    stats::{GetStatsHandler, StatsSnapshot},
};
