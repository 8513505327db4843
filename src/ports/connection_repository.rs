//! ConnectionRepository port for connection persistence operations

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ProblemSlug};
use crate::domain::problem::Connection;

/// Repository for managing connections between problems.
///
/// A connection is its own identity: (axis, problem_a, problem_b).
/// Inserting an existing connection is a no-op reported through the
/// return value, not an error, so callers decide whether a duplicate
/// is a conflict.
#[async_trait]
pub trait ConnectionRepository: Send + Sync {
    /// Insert a connection; returns true when it was newly added.
    async fn insert(&self, connection: &Connection) -> Result<bool, DomainError>;

    /// Check if a connection exists.
    async fn contains(&self, connection: &Connection) -> Result<bool, DomainError>;

    /// All connections touching the given problem from either end.
    async fn list_for_problem(
        &self,
        problem: &ProblemSlug,
    ) -> Result<Vec<Connection>, DomainError>;

    /// Number of stored connections.
    async fn count(&self) -> Result<usize, DomainError>;
}
