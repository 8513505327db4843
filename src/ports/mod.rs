//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Storage Ports
//!
//! - `ProblemRepository` - Problem persistence keyed by slug
//! - `ConnectionRepository` - Connection persistence
//! - `RatingRepository` - Contributed rating slots
//! - `AggregateRatingRepository` - Cache of computed aggregates
//!
//! ## Validation Ports
//!
//! - `DocumentValidator` - Upload document schema validation

mod aggregate_repository;
mod connection_repository;
mod document_validator;
mod problem_repository;
mod rating_repository;

pub use aggregate_repository::AggregateRatingRepository;
pub use connection_repository::ConnectionRepository;
pub use document_validator::{DocumentKind, DocumentValidator, SchemaValidationError};
pub use problem_repository::ProblemRepository;
pub use rating_repository::RatingRepository;
