//! HTTP handlers for community endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::domain_error_response;
use crate::adapters::render::ProblemPageGenerator;
use crate::application::{GetCommunityPayloadHandler, GetCommunityPayloadQuery};
use crate::domain::foundation::{DomainError, GeoScope, OrgScope, ProblemSlug};
use crate::domain::rating::AggregationMethod;

use super::dto::{community_payload_json, CommunityParams};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct CommunitiesHandlers {
    payload_handler: Arc<GetCommunityPayloadHandler>,
    page_generator: ProblemPageGenerator,
}

impl CommunitiesHandlers {
    pub fn new(payload_handler: Arc<GetCommunityPayloadHandler>) -> Self {
        Self {
            payload_handler,
            page_generator: ProblemPageGenerator::new(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /communities/:human_id - Entity-keyed community payload
pub async fn get_community(
    State(handlers): State<CommunitiesHandlers>,
    Path(human_id): Path<String>,
    Query(params): Query<CommunityParams>,
) -> Response {
    let query = match decode_community_query(&human_id, params) {
        Ok(query) => query,
        Err(e) => return domain_error_response(e),
    };
    match handlers.payload_handler.handle(query).await {
        Ok(payload) => (StatusCode::OK, Json(community_payload_json(&payload))).into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// GET /communities/:human_id/page - Rendered community page
pub async fn get_community_page(
    State(handlers): State<CommunitiesHandlers>,
    Path(human_id): Path<String>,
    Query(params): Query<CommunityParams>,
) -> Response {
    let query = match decode_community_query(&human_id, params) {
        Ok(query) => query,
        Err(e) => return domain_error_response(e),
    };
    match handlers.payload_handler.handle(query).await {
        Ok(payload) => {
            let html = handlers.page_generator.generate(&payload);
            (StatusCode::OK, Html(html)).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Request decoding
// ════════════════════════════════════════════════════════════════════════════

fn decode_community_query(
    human_id: &str,
    params: CommunityParams,
) -> Result<GetCommunityPayloadQuery, DomainError> {
    let problem = ProblemSlug::new(human_id)?;
    let org = match params.org.as_deref() {
        Some(raw) => OrgScope::new(raw)?,
        None => {
            return Err(DomainError::validation(
                "org",
                "Query parameter 'org' is required",
            ))
        }
    };
    let geo = match params.geo.as_deref() {
        Some(raw) => GeoScope::new(raw)?,
        None => GeoScope::global(),
    };
    let aggregation = match params.aggregation.as_deref() {
        Some(raw) => raw.parse::<AggregationMethod>()?,
        None => AggregationMethod::Strict,
    };
    Ok(GetCommunityPayloadQuery {
        problem,
        org,
        geo,
        aggregation,
    })
}
