//! In-Memory Aggregate Rating Repository Adapter
//!
//! Caches computed aggregate ratings in memory.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::community::Community;
use crate::domain::foundation::DomainError;
use crate::domain::problem::Connection;
use crate::domain::rating::{AggregateRating, AggregationMethod};
use crate::ports::AggregateRatingRepository;

type AggregateKey = (Connection, Community, AggregationMethod);

/// In-memory cache for aggregate ratings
#[derive(Debug, Clone)]
pub struct InMemoryAggregateRepository {
    aggregates: Arc<RwLock<HashMap<AggregateKey, AggregateRating>>>,
}

impl InMemoryAggregateRepository {
    /// Create a new in-memory repository
    pub fn new() -> Self {
        Self {
            aggregates: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Clear all cached data (useful for tests)
    pub async fn clear(&self) {
        self.aggregates.write().await.clear();
    }
}

impl Default for InMemoryAggregateRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AggregateRatingRepository for InMemoryAggregateRepository {
    async fn get(
        &self,
        connection: &Connection,
        community: &Community,
        aggregation: AggregationMethod,
    ) -> Result<Option<AggregateRating>, DomainError> {
        let aggregates = self.aggregates.read().await;
        let key = (connection.clone(), community.clone(), aggregation);
        Ok(aggregates.get(&key).cloned())
    }

    async fn put(&self, aggregate: &AggregateRating) -> Result<(), DomainError> {
        let mut aggregates = self.aggregates.write().await;
        let key = (
            aggregate.connection().clone(),
            aggregate.community().clone(),
            aggregate.aggregation(),
        );
        aggregates.insert(key, aggregate.clone());
        Ok(())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let aggregates = self.aggregates.read().await;
        Ok(aggregates.len())
    }
}
