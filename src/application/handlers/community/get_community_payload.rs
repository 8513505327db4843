//! GetCommunityPayloadHandler - Query handler for a community's rated graph.
//!
//! A community is a (problem, org, geo) perspective. Its payload carries the
//! problem's connections in all four categories, each with the aggregate
//! rating computed from contributions made within that perspective. Missing
//! aggregates are computed from stored contributions and cached; later
//! ratings keep the cache current incrementally, so repeated reads stay
//! cheap.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::domain::community::Community;
use crate::domain::foundation::{DomainError, ErrorCode, GeoScope, OrgScope, ProblemSlug};
use crate::domain::problem::{Connection, ConnectionCategory, Problem, ProblemName};
use crate::domain::rating::{AggregateRating, AggregationMethod};
use crate::ports::{
    AggregateRatingRepository, ConnectionRepository, ProblemRepository, RatingRepository,
};

/// Query for a community payload.
#[derive(Debug, Clone)]
pub struct GetCommunityPayloadQuery {
    pub problem: ProblemSlug,
    pub org: OrgScope,
    pub geo: GeoScope,
    pub aggregation: AggregationMethod,
}

/// One rated connection within a community payload.
#[derive(Debug, Clone)]
pub struct CommunityPayloadEntry {
    pub aggregate: AggregateRating,
    pub adjacent_problem_name: ProblemName,
    /// URI of the adjacent problem's community in the same org and geo.
    pub adjacent_community_url: String,
}

/// A community's problem and its rated connections.
#[derive(Debug, Clone)]
pub struct CommunityPayload {
    pub community: Community,
    pub problem: Problem,
    pub aggregation: AggregationMethod,
    /// All four categories in display order, strongest ratings first.
    pub categories: Vec<(ConnectionCategory, Vec<CommunityPayloadEntry>)>,
}

/// Handler for reading community payloads.
pub struct GetCommunityPayloadHandler {
    problems: Arc<dyn ProblemRepository>,
    connections: Arc<dyn ConnectionRepository>,
    ratings: Arc<dyn RatingRepository>,
    aggregates: Arc<dyn AggregateRatingRepository>,
}

impl GetCommunityPayloadHandler {
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

    pub async fn handle(
        &self,
        query: GetCommunityPayloadQuery,
    ) -> Result<CommunityPayload, DomainError> {
        // 1. Only implemented aggregation methods can build a payload
        if !query.aggregation.is_supported() {
            return Err(DomainError::new(
                ErrorCode::InvalidAggregation,
                format!(
                    "Aggregation method '{}' is not implemented",
                    query.aggregation
                ),
            )
            .with_detail("aggregation", query.aggregation.as_str()));
        }

        // 2. The community's problem must exist
        let problem = self.problems.find(&query.problem).await?.ok_or_else(|| {
            DomainError::new(
                ErrorCode::ProblemNotFound,
                format!("Problem '{}' does not exist", query.problem),
            )
            .with_detail("human_id", query.problem.as_str())
        })?;
        let community = Community::new(query.problem.clone(), query.org, query.geo);

        // 3. Aggregate every connection within this community's scope
        let mut categories: Vec<(ConnectionCategory, Vec<CommunityPayloadEntry>)> =
            ConnectionCategory::ALL
                .iter()
                .map(|category| (*category, Vec::new()))
                .collect();
        for connection in self.connections.list_for_problem(&query.problem).await? {
            let aggregate = self
                .aggregate_for(&connection, &community, query.aggregation)
                .await?;
            let entry = self.payload_entry(&community, aggregate).await?;
            let category = entry.aggregate.category();
            if let Some((_, entries)) = categories.iter_mut().find(|(c, _)| *c == category) {
                entries.push(entry);
            }
        }

        // 4. Strongest connections first; ties resolve alphabetically
        for (_, entries) in categories.iter_mut() {
            entries.sort_by(|a, b| {
                b.aggregate
                    .rating()
                    .partial_cmp(&a.aggregate.rating())
                    .unwrap_or(Ordering::Equal)
                    .then_with(|| a.adjacent_problem_name.cmp(&b.adjacent_problem_name))
            });
        }

        Ok(CommunityPayload {
            community,
            problem,
            aggregation: query.aggregation,
            categories,
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

    async fn payload_entry(
        &self,
        community: &Community,
        aggregate: AggregateRating,
    ) -> Result<CommunityPayloadEntry, DomainError> {
        let adjacent = aggregate.adjacent_problem();
        let adjacent_problem_name = match self.problems.find(adjacent).await? {
            Some(problem) => problem.name().clone(),
            None => ProblemName::from_slug(adjacent)?,
        };
        let adjacent_community_url =
            Community::uri_for(adjacent, community.org(), community.geo());
        Ok(CommunityPayloadEntry {
            aggregate,
            adjacent_problem_name,
            adjacent_community_url,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
