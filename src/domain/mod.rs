//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `problem` - Problem aggregate, connections, and upload documents
//! - `rating` - Contributed ratings and weighted aggregates
//! - `community` - Community scope (problem + org + geo)

pub mod community;
pub mod foundation;
pub mod problem;
pub mod rating;
