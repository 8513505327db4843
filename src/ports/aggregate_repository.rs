//! AggregateRatingRepository port for cached aggregate ratings

use async_trait::async_trait;

use crate::domain::community::Community;
use crate::domain::foundation::DomainError;
use crate::domain::problem::Connection;
use crate::domain::rating::{AggregateRating, AggregationMethod};

/// Cache of computed aggregate ratings.
///
/// Aggregates are derived data: a miss means the caller computes from
/// contributed ratings and stores the result. Rating writes keep cached
/// entries current through incremental updates, so entries never go
/// stale and need no expiry.
#[async_trait]
pub trait AggregateRatingRepository: Send + Sync {
    /// Fetch the cached aggregate for a connection within a community.
    async fn get(
        &self,
        connection: &Connection,
        community: &Community,
        aggregation: AggregationMethod,
    ) -> Result<Option<AggregateRating>, DomainError>;

    /// Store or replace a computed aggregate.
    async fn put(&self, aggregate: &AggregateRating) -> Result<(), DomainError>;

    /// Number of cached aggregates.
    async fn count(&self) -> Result<usize, DomainError>;
}
