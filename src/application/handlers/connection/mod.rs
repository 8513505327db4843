//! Connection command handlers.

mod connect_problems;

pub use connect_problems::{ConnectProblemsCommand, ConnectProblemsHandler, ConnectProblemsResult};
