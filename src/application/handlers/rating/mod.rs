//! Rating command handlers.

mod rate_connection;

pub use rate_connection::{RateConnectionCommand, RateConnectionHandler, RateConnectionResult};
