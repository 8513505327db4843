//! GetProblemHandler - Query handler for reading one problem.
//!
//! Returns the stored problem along with its connections grouped into the
//! four categories, each entry carrying the adjacent problem's display name
//! and a count of stored ratings across every perspective.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, ProblemSlug};
use crate::domain::problem::{Connection, ConnectionCategory, Problem, ProblemName};
use crate::ports::{ConnectionRepository, ProblemRepository, RatingRepository};

/// Query for a single problem by slug.
#[derive(Debug, Clone)]
pub struct GetProblemQuery {
    pub human_id: ProblemSlug,
}

/// One connection as seen from the queried problem.
#[derive(Debug, Clone)]
pub struct ConnectionSummary {
    pub connection: Connection,
    pub category: ConnectionCategory,
    pub adjacent_problem: ProblemSlug,
    pub adjacent_problem_name: ProblemName,
    /// Stored ratings on this connection, across all perspectives.
    pub rating_count: usize,
}

/// A problem with its categorized connections.
#[derive(Debug, Clone)]
pub struct GetProblemResult {
    pub problem: Problem,
    /// All four categories in display order, empty ones included.
    pub categories: Vec<(ConnectionCategory, Vec<ConnectionSummary>)>,
}

/// Handler for reading problems.
pub struct GetProblemHandler {
    problems: Arc<dyn ProblemRepository>,
    connections: Arc<dyn ConnectionRepository>,
    ratings: Arc<dyn RatingRepository>,
}

impl GetProblemHandler {
    pub fn new(
        problems: Arc<dyn ProblemRepository>,
        connections: Arc<dyn ConnectionRepository>,
        ratings: Arc<dyn RatingRepository>,
    ) -> Self {
        Self {
            problems,
            connections,
            ratings,
        }
    }

    pub async fn handle(&self, query: GetProblemQuery) -> Result<GetProblemResult, DomainError> {
        // 1. The problem must exist
        let problem = self.problems.find(&query.human_id).await?.ok_or_else(|| {
            DomainError::new(
                ErrorCode::ProblemNotFound,
                format!("Problem '{}' does not exist", query.human_id),
            )
            .with_detail("human_id", query.human_id.as_str())
        })?;

        // 2. Summarize every connection from this problem's point of view
        let mut categories: Vec<(ConnectionCategory, Vec<ConnectionSummary>)> =
            ConnectionCategory::ALL
                .iter()
                .map(|category| (*category, Vec::new()))
                .collect();
        for connection in self.connections.list_for_problem(&query.human_id).await? {
            let summary = self.summarize(connection, &query.human_id).await?;
            if let Some((_, entries)) = categories.iter_mut().find(|(c, _)| *c == summary.category)
            {
                entries.push(summary);
            }
        }
        for (_, entries) in categories.iter_mut() {
            entries.sort_by(|a, b| a.adjacent_problem_name.cmp(&b.adjacent_problem_name));
        }

        Ok(GetProblemResult {
            problem,
            categories,
        })
    }

    async fn summarize(
        &self,
        connection: Connection,
        viewpoint: &ProblemSlug,
    ) -> Result<ConnectionSummary, DomainError> {
        let category = connection.category_for(viewpoint)?;
        let adjacent = connection.adjacent_to(viewpoint)?.clone();
        // Adjacent problems normally exist, but a name can be recovered from
        // the slug when one does not.
        let adjacent_problem_name = match self.problems.find(&adjacent).await? {
            Some(problem) => problem.name().clone(),
            None => ProblemName::from_slug(&adjacent)?,
        };
        let rating_count = self
            .ratings
            .find_for_connection(&connection, None)
            .await?
            .len();
        Ok(ConnectionSummary {
            connection,
            category,
            adjacent_problem: adjacent,
            adjacent_problem_name,
            rating_count,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
