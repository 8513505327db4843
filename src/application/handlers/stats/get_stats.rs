//! GetStatsHandler - Query handler for storage counts.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::DomainError;
use crate::ports::{
    AggregateRatingRepository, ConnectionRepository, ProblemRepository, RatingRepository,
};

/// Counts of everything stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub problems: usize,
    pub connections: usize,
    pub ratings: usize,
    pub aggregates: usize,
}

/// Handler for reading storage statistics.
pub struct GetStatsHandler {
    problems: Arc<dyn ProblemRepository>,
    connections: Arc<dyn ConnectionRepository>,
    ratings: Arc<dyn RatingRepository>,
    aggregates: Arc<dyn AggregateRatingRepository>,
}

impl GetStatsHandler {
    pub fn new(
        problems: Arc<dyn ProblemRepository>,
        connections: Arc<dyn ConnectionRepository>,
        ratings: Arc<dyn RatingRepository>,
        aggregates: Arc<dyn AggregateRatingRepository>,
    ) -> Self {
        Self {
            problems,
            connections,
            ratings,
            aggregates,
        }
    }

    pub async fn handle(&self) -> Result<StatsSnapshot, DomainError> {
        Ok(StatsSnapshot {
            problems: self.problems.count().await?,
            connections: self.connections.count().await?,
            ratings: self.ratings.count().await?,
            aggregates: self.aggregates.count().await?,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::{
        InMemoryAggregateRepository, InMemoryConnectionRepository, InMemoryProblemRepository,
        InMemoryRatingRepository,
    };
    use crate::domain::problem::{Problem, ProblemName};

    #[tokio::test]
    async fn reports_zero_counts_for_empty_storage() {
        let handler = GetStatsHandler::new(
            Arc::new(InMemoryProblemRepository::new()),
            Arc::new(InMemoryConnectionRepository::new()),
            Arc::new(InMemoryRatingRepository::new()),
            Arc::new(InMemoryAggregateRepository::new()),
        );

        let snapshot = handler.handle().await.unwrap();

        assert_eq!(
            snapshot,
            StatsSnapshot {
                problems: 0,
                connections: 0,
                ratings: 0,
                aggregates: 0
            }
        );
    }

    #[tokio::test]
    async fn counts_stored_problems() {
        let problems = Arc::new(InMemoryProblemRepository::new());
        for name in ["Drought", "Famine"] {
            problems
                .save(&Problem::new(ProblemName::new(name).unwrap()))
                .await
                .unwrap();
        }
        let handler = GetStatsHandler::new(
            problems,
            Arc::new(InMemoryConnectionRepository::new()),
            Arc::new(InMemoryRatingRepository::new()),
            Arc::new(InMemoryAggregateRepository::new()),
        );

        let snapshot = handler.handle().await.unwrap();

        assert_eq!(snapshot.problems, 2);
    }
}
