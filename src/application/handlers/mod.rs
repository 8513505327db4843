//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod community;
pub mod connection;
pub mod data;
pub mod problem;
pub mod rating;
pub mod stats;
