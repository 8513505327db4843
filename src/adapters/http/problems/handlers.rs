//! HTTP handlers for problem endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use crate::adapters::http::error::domain_error_response;
use crate::application::{
    AddRatedConnectionCommand, AddRatedConnectionHandler, ConnectProblemsCommand,
    ConnectProblemsHandler, CreateProblemCommand, CreateProblemHandler, GetProblemHandler,
    GetProblemQuery, ListProblemsHandler, RateConnectionCommand, RateConnectionHandler,
    UpdateProblemCommand, UpdateProblemHandler,
};
use crate::domain::foundation::{ContributorId, DomainError, GeoScope, OrgScope, ProblemSlug};
use crate::domain::problem::{Connection, ConnectionAxis, ProblemName};
use crate::domain::rating::{AggregationMethod, RatingValue, RatingWeight};

use super::dto::{
    AddRatedConnectionRequest, ConnectProblemsRequest, ConnectProblemsResponse,
    ListProblemsResponse, ProblemCommandResponse, ProblemResponse, ProblemSummaryResponse,
    RateConnectionRequest, RateConnectionResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ProblemsHandlers {
    create_handler: Arc<CreateProblemHandler>,
    update_handler: Arc<UpdateProblemHandler>,
    get_handler: Arc<GetProblemHandler>,
    list_handler: Arc<ListProblemsHandler>,
    connect_handler: Arc<ConnectProblemsHandler>,
    rate_handler: Arc<RateConnectionHandler>,
    add_rated_handler: Arc<AddRatedConnectionHandler>,
}

impl ProblemsHandlers {
    pub fn new(
        create_handler: Arc<CreateProblemHandler>,
        update_handler: Arc<UpdateProblemHandler>,
        get_handler: Arc<GetProblemHandler>,
        list_handler: Arc<ListProblemsHandler>,
        connect_handler: Arc<ConnectProblemsHandler>,
        rate_handler: Arc<RateConnectionHandler>,
        add_rated_handler: Arc<AddRatedConnectionHandler>,
    ) -> Self {
        Self {
            create_handler,
            update_handler,
            get_handler,
            list_handler,
            connect_handler,
            rate_handler,
            add_rated_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /problems - List all problems alphabetically
pub async fn list_problems(State(handlers): State<ProblemsHandlers>) -> Response {
    match handlers.list_handler.handle().await {
        Ok(problems) => {
            let summaries: Vec<ProblemSummaryResponse> =
                problems.iter().map(ProblemSummaryResponse::from).collect();
            let response = ListProblemsResponse {
                count: summaries.len(),
                problems: summaries,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

/// POST /problems - Create a problem from a document
pub async fn create_problem(
    State(handlers): State<ProblemsHandlers>,
    Json(document): Json<Value>,
) -> Response {
    match handlers
        .create_handler
        .handle(CreateProblemCommand { document })
        .await
    {
        Ok(result) => {
            let response = ProblemCommandResponse::from_result(&result, "Problem created");
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

/// GET /problems/:human_id - Get one problem with its connections
pub async fn get_problem(
    State(handlers): State<ProblemsHandlers>,
    Path(human_id): Path<String>,
) -> Response {
    let human_id = match ProblemSlug::new(human_id) {
        Ok(slug) => slug,
        Err(e) => return domain_error_response(e.into()),
    };
    match handlers.get_handler.handle(GetProblemQuery { human_id }).await {
        Ok(result) => {
            let response = ProblemResponse::from(result);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

/// PUT /problems/:human_id - Merge a document into an existing problem
pub async fn update_problem(
    State(handlers): State<ProblemsHandlers>,
    Path(human_id): Path<String>,
    Json(document): Json<Value>,
) -> Response {
    let human_id = match ProblemSlug::new(human_id) {
        Ok(slug) => slug,
        Err(e) => return domain_error_response(e.into()),
    };
    match handlers
        .update_handler
        .handle(UpdateProblemCommand { human_id, document })
        .await
    {
        Ok(result) => {
            let response = ProblemCommandResponse::from_result(&result, "Problem updated");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

/// POST /problems/connections - Declare a connection between two problems
pub async fn connect_problems(
    State(handlers): State<ProblemsHandlers>,
    Json(req): Json<ConnectProblemsRequest>,
) -> Response {
    let cmd = match decode_connect_request(req) {
        Ok(cmd) => cmd,
        Err(e) => return domain_error_response(e),
    };
    match handlers.connect_handler.handle(cmd).await {
        Ok(result) => {
            let response = ConnectProblemsResponse::from(&result);
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

/// POST /problems/connection_ratings - Rate an existing connection
pub async fn rate_connection(
    State(handlers): State<ProblemsHandlers>,
    Json(req): Json<RateConnectionRequest>,
) -> Response {
    let cmd = match decode_rate_request(req) {
        Ok(cmd) => cmd,
        Err(e) => return domain_error_response(e),
    };
    match handlers.rate_handler.handle(cmd).await {
        Ok(result) => {
            let response = RateConnectionResponse::from(&result);
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

/// POST /problems/rated_connections - Connect and rate in one call
pub async fn add_rated_connection(
    State(handlers): State<ProblemsHandlers>,
    Json(req): Json<AddRatedConnectionRequest>,
) -> Response {
    let cmd = match decode_add_rated_request(req) {
        Ok(cmd) => cmd,
        Err(e) => return domain_error_response(e),
    };
    match handlers.add_rated_handler.handle(cmd).await {
        Ok(result) => {
            let payload = super::dto::rated_connection_payload(&result);
            (StatusCode::CREATED, Json(payload)).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Request decoding
// ════════════════════════════════════════════════════════════════════════════

fn decode_connect_request(req: ConnectProblemsRequest) -> Result<ConnectProblemsCommand, DomainError> {
    Ok(ConnectProblemsCommand {
        axis: req.axis.parse()?,
        problem_a: req.problem_a,
        problem_b: req.problem_b,
    })
}

fn decode_rate_request(req: RateConnectionRequest) -> Result<RateConnectionCommand, DomainError> {
    let axis: ConnectionAxis = req.axis.parse()?;
    let a = ProblemName::new(&req.problem_a)?.slug();
    let b = ProblemName::new(&req.problem_b)?.slug();
    let connection = Connection::new(axis, a, b)?;
    Ok(RateConnectionCommand {
        connection,
        problem: ProblemName::new(&req.problem)?.slug(),
        org: OrgScope::new(&req.org)?,
        geo: decode_geo(req.geo.as_deref())?,
        user: ContributorId::new(&req.user)?,
        rating: RatingValue::try_from_i64(req.rating)?,
        weight: decode_weight(req.weight)?,
    })
}

fn decode_add_rated_request(
    req: AddRatedConnectionRequest,
) -> Result<AddRatedConnectionCommand, DomainError> {
    Ok(AddRatedConnectionCommand {
        problem: req.problem,
        adjacent_problem: req.adjacent_problem,
        category: req.connection_category.parse()?,
        org: OrgScope::new(&req.org)?,
        geo: decode_geo(req.geo.as_deref())?,
        user: ContributorId::new(&req.user)?,
        rating: RatingValue::try_from_i64(req.rating)?,
        weight: decode_weight(req.weight)?,
        aggregation: decode_aggregation(req.aggregation.as_deref())?,
    })
}

fn decode_geo(geo: Option<&str>) -> Result<GeoScope, DomainError> {
    match geo {
        Some(raw) => Ok(GeoScope::new(raw)?),
        None => Ok(GeoScope::global()),
    }
}

fn decode_weight(weight: Option<i64>) -> Result<RatingWeight, DomainError> {
    Ok(weight
        .map(RatingWeight::try_from_i64)
        .transpose()?
        .unwrap_or_default())
}

fn decode_aggregation(aggregation: Option<&str>) -> Result<AggregationMethod, DomainError> {
    match aggregation {
        Some(raw) => Ok(raw.parse::<AggregationMethod>()?),
        None => Ok(AggregationMethod::Strict),
    }
}
