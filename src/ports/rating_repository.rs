//! RatingRepository port for contributed rating persistence operations

use async_trait::async_trait;

use crate::domain::community::Community;
use crate::domain::foundation::DomainError;
use crate::domain::problem::Connection;
use crate::domain::rating::ContributedRating;

/// Repository for contributed ratings.
///
/// Each rating occupies the slot named by its scope key; storing into an
/// occupied slot replaces the previous rating.
#[async_trait]
pub trait RatingRepository: Send + Sync {
    /// Insert or replace a rating, returning the previous slot occupant.
    async fn upsert(
        &self,
        rating: &ContributedRating,
    ) -> Result<Option<ContributedRating>, DomainError>;

    /// All ratings on the connection, optionally restricted to those
    /// placed within a community's scope.
    async fn find_for_connection(
        &self,
        connection: &Connection,
        community: Option<&Community>,
    ) -> Result<Vec<ContributedRating>, DomainError>;

    /// Number of stored ratings.
    async fn count(&self) -> Result<usize, DomainError>;
}
