//! Storage Adapters
//!
//! In-memory implementations of the repository ports.
//!
//! ## Available Adapters
//!
//! - **InMemoryProblemRepository** - Problems keyed by slug
//! - **InMemoryConnectionRepository** - The set of known connections
//! - **InMemoryRatingRepository** - Contributed ratings keyed by scope
//! - **InMemoryAggregateRepository** - Cache of computed aggregate ratings
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::InMemoryProblemRepository;
//!
//! let problems = InMemoryProblemRepository::new();
//! ```

mod in_memory_aggregate_repository;
mod in_memory_connection_repository;
mod in_memory_problem_repository;
mod in_memory_rating_repository;

pub use in_memory_aggregate_repository::InMemoryAggregateRepository;
pub use in_memory_connection_repository::InMemoryConnectionRepository;
pub use in_memory_problem_repository::InMemoryProblemRepository;
pub use in_memory_rating_repository::InMemoryRatingRepository;
