//! ListProblemsHandler - Query handler for listing all problems.

use std::sync::Arc;

use crate::domain::foundation::DomainError;
use crate::domain::problem::Problem;
use crate::ports::ProblemRepository;

/// Handler for listing problems alphabetically by display name.
pub struct ListProblemsHandler {
    problems: Arc<dyn ProblemRepository>,
}

impl ListProblemsHandler {
    pub fn new(problems: Arc<dyn ProblemRepository>) -> Self {
        Self { problems }
    }

    pub async fn handle(&self) -> Result<Vec<Problem>, DomainError> {
        self.problems.list_alphabetical().await
    }
}

// ============================================================================
// Tests
// ============================================================================
