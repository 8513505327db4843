//! HTTP DTOs for problem endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::application::{
    AddRatedConnectionResult, ConnectProblemsResult, GetProblemResult, RateConnectionResult,
    UpsertProblemResult,
};
use crate::domain::problem::{ConnectionCategory, Problem};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

// Problem documents arrive as raw JSON and are checked against the problem
// schema, so creation and update take `serde_json::Value` bodies rather than
// a typed request.

/// Request to connect two problems along an axis.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectProblemsRequest {
    /// `causal` or `scoped`.
    pub axis: String,
    /// Driving or broader problem name.
    pub problem_a: String,
    /// Driven or narrower problem name.
    pub problem_b: String,
}

/// Request to rate an existing connection.
#[derive(Debug, Clone, Deserialize)]
pub struct RateConnectionRequest {
    pub axis: String,
    pub problem_a: String,
    pub problem_b: String,
    /// Name of the end the rating is made from.
    pub problem: String,
    pub org: String,
    /// Defaults to the global geo when omitted.
    pub geo: Option<String>,
    pub user: String,
    pub rating: i64,
    /// Defaults to the base expertise weight when omitted.
    pub weight: Option<i64>,
}

/// Request to connect and rate in one call.
#[derive(Debug, Clone, Deserialize)]
pub struct AddRatedConnectionRequest {
    /// Name of the problem the rating is made from.
    pub problem: String,
    pub adjacent_problem: String,
    /// `drivers`, `impacts`, `broader`, or `narrower`.
    pub connection_category: String,
    pub org: String,
    pub geo: Option<String>,
    pub user: String,
    pub rating: i64,
    pub weight: Option<i64>,
    /// Defaults to `strict` when omitted.
    pub aggregation: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// One problem in a listing.
#[derive(Debug, Clone, Serialize)]
pub struct ProblemSummaryResponse {
    pub human_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
}

impl From<&Problem> for ProblemSummaryResponse {
    fn from(problem: &Problem) -> Self {
        Self {
            human_id: problem.slug().to_string(),
            name: problem.name().to_string(),
            definition: problem.definition().map(str::to_string),
        }
    }
}

/// Listing of all problems.
#[derive(Debug, Clone, Serialize)]
pub struct ListProblemsResponse {
    pub problems: Vec<ProblemSummaryResponse>,
    pub count: usize,
}

/// One connection as seen from the requested problem.
#[derive(Debug, Clone, Serialize)]
pub struct ConnectionSummaryResponse {
    pub adjacent_problem: String,
    pub adjacent_problem_name: String,
    pub rating_count: usize,
}

/// Full problem detail with categorized connections.
#[derive(Debug, Clone, Serialize)]
pub struct ProblemResponse {
    pub human_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sponsor: Option<String>,
    pub images: Vec<String>,
    pub drivers: Vec<ConnectionSummaryResponse>,
    pub impacts: Vec<ConnectionSummaryResponse>,
    pub broader: Vec<ConnectionSummaryResponse>,
    pub narrower: Vec<ConnectionSummaryResponse>,
}

impl From<GetProblemResult> for ProblemResponse {
    fn from(result: GetProblemResult) -> Self {
        let problem = &result.problem;
        let mut response = Self {
            human_id: problem.slug().to_string(),
            name: problem.name().to_string(),
            definition: problem.definition().map(str::to_string),
            definition_url: problem.definition_url().map(str::to_string),
            sponsor: problem.sponsor().map(str::to_string),
            images: problem.images().iter().map(|i| i.to_string()).collect(),
            drivers: Vec::new(),
            impacts: Vec::new(),
            broader: Vec::new(),
            narrower: Vec::new(),
        };
        for (category, summaries) in result.categories {
            let entries = summaries
                .into_iter()
                .map(|s| ConnectionSummaryResponse {
                    adjacent_problem: s.adjacent_problem.to_string(),
                    adjacent_problem_name: s.adjacent_problem_name.to_string(),
                    rating_count: s.rating_count,
                })
                .collect();
            match category {
                ConnectionCategory::Drivers => response.drivers = entries,
                ConnectionCategory::Impacts => response.impacts = entries,
                ConnectionCategory::Broader => response.broader = entries,
                ConnectionCategory::Narrower => response.narrower = entries,
            }
        }
        response
    }
}

/// Response for document create and update operations.
#[derive(Debug, Clone, Serialize)]
pub struct ProblemCommandResponse {
    pub human_id: String,
    pub name: String,
    pub created: bool,
    pub problems_created: usize,
    pub connections_created: usize,
    pub ratings_upserted: usize,
    pub message: String,
}

impl ProblemCommandResponse {
    pub fn from_result(result: &UpsertProblemResult, message: impl Into<String>) -> Self {
        Self {
            human_id: result.problem.slug().to_string(),
            name: result.problem.name().to_string(),
            created: result.created,
            problems_created: result.adjacent_created.len() + usize::from(result.created),
            connections_created: result.connections_created.len(),
            ratings_upserted: result.ratings_upserted.len(),
            message: message.into(),
        }
    }
}

/// Response for connection declarations.
#[derive(Debug, Clone, Serialize)]
pub struct ConnectProblemsResponse {
    pub connection: String,
    pub problems_created: Vec<String>,
    pub message: String,
}

impl From<&ConnectProblemsResult> for ConnectProblemsResponse {
    fn from(result: &ConnectProblemsResult) -> Self {
        Self {
            connection: result.connection.key_string(),
            problems_created: result
                .problems_created
                .iter()
                .map(|p| p.name().to_string())
                .collect(),
            message: "Connection created".to_string(),
        }
    }
}

/// Response for recorded ratings.
#[derive(Debug, Clone, Serialize)]
pub struct RateConnectionResponse {
    pub connection: String,
    pub community: String,
    pub user: String,
    pub rating: u8,
    pub weight: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_rating: Option<u8>,
    pub message: String,
}

impl From<&RateConnectionResult> for RateConnectionResponse {
    fn from(result: &RateConnectionResult) -> Self {
        Self {
            connection: result.rating.connection().key_string(),
            community: result.rating.community().key_string(),
            user: result.rating.user().to_string(),
            rating: result.rating.rating().value(),
            weight: result.rating.weight().value(),
            previous_rating: result.previous.as_ref().map(|p| p.rating().value()),
            message: "Rating recorded".to_string(),
        }
    }
}

/// Payload for a newly rated connection, keyed by the aggregate's key so
/// clients can index the entry directly.
pub fn rated_connection_payload(result: &AddRatedConnectionResult) -> Value {
    let aggregate = &result.aggregate;
    let key = aggregate.key_string();
    let entry = json!({
        "adjacent_problem_name": result.adjacent_problem_name.as_str(),
        "aggregation": aggregate.aggregation().as_str(),
        "community": aggregate.community().key_string(),
        "connection": aggregate.connection().key_string(),
        "connection_category": aggregate.category().as_str(),
        "rating": aggregate.rating(),
        "weight": aggregate.weight(),
    });
    let mut payload = serde_json::Map::new();
    payload.insert("root".to_string(), Value::String(key.clone()));
    payload.insert(key, entry);
    Value::Object(payload)
}
