//! RateConnectionHandler - Command handler for contributing a rating.
//!
//! Records one contributor's judgment of a connection's strength, made from
//! a (problem, org, geo) perspective. A contributor holds at most one rating
//! per perspective on a connection, so submitting again replaces the earlier
//! value. When a strict aggregate for the affected community is already
//! cached, the change is folded in incrementally rather than recomputed from
//! every stored contribution.

use std::sync::Arc;

use crate::domain::foundation::{
    ContributorId, DomainError, ErrorCode, GeoScope, OrgScope, ProblemSlug,
};
use crate::domain::problem::Connection;
use crate::domain::rating::{
    AggregateRating, AggregationMethod, ContributedRating, RatingValue, RatingWeight,
};
use crate::ports::{AggregateRatingRepository, ConnectionRepository, RatingRepository};

/// Command to record a contributor's rating of a connection.
#[derive(Debug, Clone)]
pub struct RateConnectionCommand {
    pub connection: Connection,
    /// The end of the connection the contributor is rating from.
    pub problem: ProblemSlug,
    pub org: OrgScope,
    pub geo: GeoScope,
    pub user: ContributorId,
    pub rating: RatingValue,
    pub weight: RatingWeight,
}

/// Result of recording a rating.
#[derive(Debug, Clone)]
pub struct RateConnectionResult {
    /// The rating as stored.
    pub rating: ContributedRating,
    /// The rating this contribution replaced, if any.
    pub previous: Option<ContributedRating>,
    /// The refreshed strict aggregate, when one was already cached.
    pub aggregate: Option<AggregateRating>,
}

/// Handler for recording contributed ratings.
pub struct RateConnectionHandler {
    connections: Arc<dyn ConnectionRepository>,
    ratings: Arc<dyn RatingRepository>,
    aggregates: Arc<dyn AggregateRatingRepository>,
}

impl RateConnectionHandler {
    pub fn new(
        connections: Arc<dyn ConnectionRepository>,
        ratings: Arc<dyn RatingRepository>,
        aggregates: Arc<dyn AggregateRatingRepository>,
    ) -> Self {
        Self {
            connections,
            ratings,
            aggregates,
        }
    }

    pub async fn handle(
        &self,
        cmd: RateConnectionCommand,
    ) -> Result<RateConnectionResult, DomainError> {
        // 1. The connection must already exist
        if !self.connections.contains(&cmd.connection).await? {
            return Err(DomainError::new(
                ErrorCode::ConnectionNotFound,
                format!("Connection '{}' does not exist", cmd.connection),
            )
            .with_detail("connection", cmd.connection.key_string()));
        }

        // 2. Build the rating; this checks the problem lies on the connection
        let rating = ContributedRating::new(
            cmd.connection,
            cmd.problem,
            cmd.org,
            cmd.geo,
            cmd.user,
            cmd.rating,
            cmd.weight,
        )?;

        // 3. Store it, replacing this contributor's earlier rating in the same scope
        let previous = self.ratings.upsert(&rating).await?;

        // 4. Fold the change into the cached strict aggregate, if one exists
        let aggregate = self
            .refresh_cached_aggregate(&rating, previous.as_ref())
            .await?;

        Ok(RateConnectionResult {
            rating,
            previous,
            aggregate,
        })
    }

    /// Applies a contribution to the cached strict aggregate of the affected
    /// community. On a cache miss nothing is written; the aggregate is built
    /// from stored contributions the next time it is read.
    async fn refresh_cached_aggregate(
        &self,
        rating: &ContributedRating,
        previous: Option<&ContributedRating>,
    ) -> Result<Option<AggregateRating>, DomainError> {
        let community = rating.community();
        let cached = self
            .aggregates
            .get(rating.connection(), &community, AggregationMethod::Strict)
            .await?;
        let Some(mut aggregate) = cached else {
            return Ok(None);
        };
        aggregate.apply_contribution(
            (rating.rating(), rating.weight()),
            previous.map(|p| (p.rating(), p.weight())),
        );
        self.aggregates.put(&aggregate).await?;
        Ok(Some(aggregate))
    }
}

// ============================================================================
// Tests
// ============================================================================
