//! AddRatedConnectionHandler - Command handler for the combined write path.
//!
//! Accepts two problem names, the category joining them, and one rating made
//! from the first problem's perspective. Whatever is missing gets created:
//! unknown problems, then the connection, then the rating. The refreshed
//! aggregate for the caller's community comes back in the result, so a
//! client can splice the newly rated connection into a rendered page without
//! a second round trip.

use std::sync::Arc;

use crate::application::handlers::rating::{RateConnectionCommand, RateConnectionHandler};
use crate::domain::community::Community;
use crate::domain::foundation::{ContributorId, DomainError, ErrorCode, GeoScope, OrgScope};
use crate::domain::problem::{Connection, ConnectionCategory, Problem, ProblemName};
use crate::domain::rating::{
    AggregateRating, AggregationMethod, ContributedRating, RatingValue, RatingWeight,
};
use crate::ports::{
    AggregateRatingRepository, ConnectionRepository, ProblemRepository, RatingRepository,
};

/// Command to connect and rate in one step.
#[derive(Debug, Clone)]
pub struct AddRatedConnectionCommand {
    /// Display name of the problem the rating is made from.
    pub problem: String,
    /// Display name of the problem on the other end.
    pub adjacent_problem: String,
    pub category: ConnectionCategory,
    pub org: OrgScope,
    pub geo: GeoScope,
    pub user: ContributorId,
    pub rating: RatingValue,
    pub weight: RatingWeight,
    pub aggregation: AggregationMethod,
}

/// Result of the combined write.
#[derive(Debug, Clone)]
pub struct AddRatedConnectionResult {
    pub rating: ContributedRating,
    /// Aggregate for the caller's community after this rating landed.
    pub aggregate: AggregateRating,
    pub adjacent_problem_name: ProblemName,
    pub problems_created: Vec<Problem>,
    pub connection_created: bool,
}

/// Handler for adding rated connections.
pub struct AddRatedConnectionHandler {
    problems: Arc<dyn ProblemRepository>,
    connections: Arc<dyn ConnectionRepository>,
    ratings: Arc<dyn RatingRepository>,
    aggregates: Arc<dyn AggregateRatingRepository>,
    rate_connection: Arc<RateConnectionHandler>,
}

impl AddRatedConnectionHandler {
    pub fn new(
        problems: Arc<dyn ProblemRepository>,
        connections: Arc<dyn ConnectionRepository>,
        ratings: Arc<dyn RatingRepository>,
        aggregates: Arc<dyn AggregateRatingRepository>,
        rate_connection: Arc<RateConnectionHandler>,
    ) -> Self {
        Self {
            problems,
            connections,
            ratings,
            aggregates,
            rate_connection,
        }
    }

    pub async fn handle(
        &self,
        cmd: AddRatedConnectionCommand,
    ) -> Result<AddRatedConnectionResult, DomainError> {
        // 1. The result must carry an aggregate, so the method has to be
        //    implemented before anything is written
        if !cmd.aggregation.is_supported() {
            return Err(DomainError::new(
                ErrorCode::InvalidAggregation,
                format!("Aggregation method '{}' is not implemented", cmd.aggregation),
            )
            .with_detail("aggregation", cmd.aggregation.as_str()));
        }

        // 2. Normalize names and derive the directed connection
        let name = ProblemName::new(&cmd.problem)?;
        let adjacent_name = ProblemName::new(&cmd.adjacent_problem)?;
        let slug = name.slug();
        let adjacent_slug = adjacent_name.slug();
        let connection = Connection::from_category(cmd.category, &slug, &adjacent_slug)?;

        // 3. Create whichever problems are missing
        let mut problems_created = Vec::new();
        for candidate in [name, adjacent_name] {
            if !self.problems.exists(&candidate.slug()).await? {
                let problem = Problem::new(candidate);
                self.problems.save(&problem).await?;
                problems_created.push(problem);
            }
        }

        // 4. Vivify the connection; unlike the bare connect command, an
        //    existing connection is not a conflict here
        let connection_created = self.connections.insert(&connection).await?;

        // 5. Record the rating through the shared path
        let rated = self
            .rate_connection
            .handle(RateConnectionCommand {
                connection: connection.clone(),
                problem: slug.clone(),
                org: cmd.org,
                geo: cmd.geo,
                user: cmd.user,
                rating: cmd.rating,
                weight: cmd.weight,
            })
            .await?;

        // 6. Produce the aggregate for the caller's community
        let community = rated.rating.community();
        let aggregate = self
            .aggregate_for(&connection, &community, cmd.aggregation)
            .await?;

        // The adjacent problem exists by now; read back its stored name
        let adjacent_problem_name = match self.problems.find(&adjacent_slug).await? {
            Some(problem) => problem.name().clone(),
            None => ProblemName::from_slug(&adjacent_slug)?,
        };

        Ok(AddRatedConnectionResult {
            rating: rated.rating,
            aggregate,
            adjacent_problem_name,
            problems_created,
            connection_created,
        })
    }

    /// Reads the cached aggregate, or computes it from stored contributions
    /// and fills the cache.
    async fn aggregate_for(
        &self,
        connection: &Connection,
        community: &Community,
        aggregation: AggregationMethod,
    ) -> Result<AggregateRating, DomainError> {
        if let Some(cached) = self
            .aggregates
            .get(connection, community, aggregation)
            .await?
        {
            return Ok(cached);
        }
        let contributions = self
            .ratings
            .find_for_connection(connection, Some(community))
            .await?;
        let aggregate = AggregateRating::from_contributions(
            connection.clone(),
            community.clone(),
            aggregation,
            &contributions,
        )?;
        self.aggregates.put(&aggregate).await?;
        Ok(aggregate)
    }
}

// ============================================================================
// Tests
// ============================================================================
