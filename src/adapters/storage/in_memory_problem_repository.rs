//! In-Memory Problem Repository Adapter
//!
//! Stores problems in memory, keyed by slug.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ProblemSlug};
use crate::domain::problem::Problem;
use crate::ports::ProblemRepository;

/// In-memory storage for problems
#[derive(Debug, Clone)]
pub struct InMemoryProblemRepository {
    problems: Arc<RwLock<HashMap<ProblemSlug, Problem>>>,
}

impl InMemoryProblemRepository {
    /// Create a new in-memory repository
    pub fn new() -> Self {
        Self {
            problems: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Clear all stored data (useful for tests)
    pub async fn clear(&self) {
        self.problems.write().await.clear();
    }
}

impl Default for InMemoryProblemRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProblemRepository for InMemoryProblemRepository {
    async fn save(&self, problem: &Problem) -> Result<(), DomainError> {
        let mut problems = self.problems.write().await;
        problems.insert(problem.slug().clone(), problem.clone());
        Ok(())
    }

    async fn find(&self, slug: &ProblemSlug) -> Result<Option<Problem>, DomainError> {
        let problems = self.problems.read().await;
        Ok(problems.get(slug).cloned())
    }

    async fn exists(&self, slug: &ProblemSlug) -> Result<bool, DomainError> {
        let problems = self.problems.read().await;
        Ok(problems.contains_key(slug))
    }

    async fn list_alphabetical(&self) -> Result<Vec<Problem>, DomainError> {
        let problems = self.problems.read().await;
        let mut all: Vec<Problem> = problems.values().cloned().collect();
        all.sort_by(|a, b| a.name().as_str().cmp(b.name().as_str()));
        Ok(all)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let problems = self.problems.read().await;
        Ok(problems.len())
    }
}
