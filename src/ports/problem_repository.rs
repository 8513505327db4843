//! ProblemRepository port for problem persistence operations

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ProblemSlug};
use crate::domain::problem::Problem;

/// Repository for managing problems, keyed by slug.
#[async_trait]
pub trait ProblemRepository: Send + Sync {
    /// Insert or replace a problem.
    async fn save(&self, problem: &Problem) -> Result<(), DomainError>;

    /// Find a problem by slug.
    async fn find(&self, slug: &ProblemSlug) -> Result<Option<Problem>, DomainError>;

    /// Check if a problem exists.
    async fn exists(&self, slug: &ProblemSlug) -> Result<bool, DomainError>;

    /// All problems ordered by name.
    async fn list_alphabetical(&self) -> Result<Vec<Problem>, DomainError>;

    /// Number of stored problems.
    async fn count(&self) -> Result<usize, DomainError>;
}
