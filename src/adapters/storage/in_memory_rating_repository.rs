//! In-Memory Rating Repository Adapter
//!
//! Stores contributed ratings in memory, keyed by their scope.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::community::Community;
use crate::domain::foundation::DomainError;
use crate::domain::problem::Connection;
use crate::domain::rating::{ContributedRating, RatingScopeKey};
use crate::ports::RatingRepository;

/// In-memory rating store for testing and development
#[derive(Debug, Clone)]
pub struct InMemoryRatingRepository {
    ratings: Arc<RwLock<HashMap<RatingScopeKey, ContributedRating>>>,
}

impl InMemoryRatingRepository {
    /// Create a new in-memory repository
    pub fn new() -> Self {
        Self {
            ratings: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Clear all stored data (useful for tests)
    pub async fn clear(&self) {
        self.ratings.write().await.clear();
    }
}

impl Default for InMemoryRatingRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RatingRepository for InMemoryRatingRepository {
    async fn upsert(
        &self,
        rating: &ContributedRating,
    ) -> Result<Option<ContributedRating>, DomainError> {
        let mut ratings = self.ratings.write().await;
        Ok(ratings.insert(rating.scope_key(), rating.clone()))
    }

    async fn find_for_connection(
        &self,
        connection: &Connection,
        community: Option<&Community>,
    ) -> Result<Vec<ContributedRating>, DomainError> {
        let ratings = self.ratings.read().await;
        let mut found: Vec<ContributedRating> = ratings
            .values()
            .filter(|r| r.connection() == connection)
            .filter(|r| community.map_or(true, |c| r.in_community(c)))
            .cloned()
            .collect();
        // HashMap iteration order is unstable; user order keeps listings deterministic.
        found.sort_by(|a, b| a.user().as_str().cmp(b.user().as_str()));
        Ok(found)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let ratings = self.ratings.read().await;
        Ok(ratings.len())
    }
}
