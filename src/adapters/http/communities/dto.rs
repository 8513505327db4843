//! HTTP DTOs for community endpoints.

use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::application::CommunityPayload;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Query parameters selecting a community scope and aggregation method.
#[derive(Debug, Clone, Deserialize)]
pub struct CommunityParams {
    pub org: Option<String>,
    pub geo: Option<String>,
    pub aggregation: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response payload
// ════════════════════════════════════════════════════════════════════════════

/// Entity-keyed payload consumed by community page clients.
///
/// The `root` key names the community record, which carries the scope fields
/// and per-category `aggregate_ratings` lists. Unrated connections report a
/// rating of -1.0.
pub fn community_payload_json(payload: &CommunityPayload) -> Value {
    let community_key = payload.community.key_string();

    let mut aggregate_ratings = Map::new();
    for (category, entries) in &payload.categories {
        let list: Vec<Value> = entries
            .iter()
            .map(|entry| {
                json!({
                    "adjacent_community_url": entry.adjacent_community_url,
                    "adjacent_problem_name": entry.adjacent_problem_name.as_str(),
                    "rating": entry.aggregate.rating(),
                })
            })
            .collect();
        aggregate_ratings.insert(category.as_str().to_string(), Value::Array(list));
    }

    let record = json!({
        "problem": payload.problem.slug().to_string(),
        "org": payload.community.org().as_str(),
        "geo": payload.community.geo().as_str(),
        "aggregate_ratings": aggregate_ratings,
    });

    let mut root = Map::new();
    root.insert("root".to_string(), Value::String(community_key.clone()));
    root.insert(community_key, record);
    Value::Object(root)
}
