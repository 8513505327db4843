//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - REST API endpoints
//! - `render` - Server-side HTML generation
//! - `storage` - In-memory repository implementations
//! - `validation` - JSON Schema document validation

pub mod http;
pub mod render;
pub mod storage;
pub mod validation;

pub use render::ProblemPageGenerator;
pub use storage::{
    InMemoryAggregateRepository, InMemoryConnectionRepository, InMemoryProblemRepository,
    InMemoryRatingRepository,
};
pub use validation::JsonDocumentValidator;
