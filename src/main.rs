//! Intertwine - Problem Network Service
//!
//! Serves the problem graph over HTTP: problem documents, connections,
//! contributed ratings, and community-scoped aggregate payloads.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use intertwine::adapters::http::{
    communities_routes, problems_routes, system_routes, CommunitiesHandlers, ProblemsHandlers,
    SystemHandlers,
};
use intertwine::adapters::{
    InMemoryAggregateRepository, InMemoryConnectionRepository, InMemoryProblemRepository,
    InMemoryRatingRepository, JsonDocumentValidator,
};
use intertwine::application::{
    AddRatedConnectionHandler, ConnectProblemsHandler, CreateProblemHandler,
    GetCommunityPayloadHandler, GetProblemHandler, GetStatsHandler, ListProblemsHandler,
    LoadDataCommand, LoadDataHandler, RateConnectionHandler, UpdateProblemHandler,
    UpsertProblemHandler,
};
use intertwine::config::AppConfig;
use intertwine::ports::{
    AggregateRatingRepository, ConnectionRepository, DocumentValidator, ProblemRepository,
    RatingRepository,
};

fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;

    init_tracing(&config);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.server.worker_threads)
        .enable_all()
        .build()?;
    runtime.block_on(run(config))
}

fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.server.log_level.clone().into());
    if config.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn run(config: AppConfig) -> anyhow::Result<()> {
    info!("======================================");
    info!("  Intertwine - Problem Network Service");
    info!("======================================");
    info!("Listen: {}:{}", config.server.host, config.server.port);
    info!("Workers: {}", config.server.worker_threads);
    info!("Environment: {:?}", config.server.environment);
    info!("======================================");

    let wiring = Wiring::new();

    if config.data.load_on_startup {
        if let Some(path) = &config.data.json_path {
            let result = wiring
                .load_handler
                .handle(LoadDataCommand { path: path.clone() })
                .await?;
            info!(
                files = result.files_loaded,
                problems = result.problems.len(),
                connections = result.connections.len(),
                ratings = result.ratings.len(),
                "Startup data load complete"
            );
        }
    }

    let app = build_app(&config, &wiring);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Serving on http://{}", addr);
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

/// Repositories and handlers shared by every router.
struct Wiring {
    problems_handlers: ProblemsHandlers,
    communities_handlers: CommunitiesHandlers,
    system_handlers: SystemHandlers,
    load_handler: LoadDataHandler,
}

impl Wiring {
    fn new() -> Self {
        let problems: Arc<dyn ProblemRepository> = Arc::new(InMemoryProblemRepository::new());
        let connections: Arc<dyn ConnectionRepository> =
            Arc::new(InMemoryConnectionRepository::new());
        let ratings: Arc<dyn RatingRepository> = Arc::new(InMemoryRatingRepository::new());
        let aggregates: Arc<dyn AggregateRatingRepository> =
            Arc::new(InMemoryAggregateRepository::new());
        let validator: Arc<dyn DocumentValidator> = Arc::new(JsonDocumentValidator::new());

        let rate_handler = Arc::new(RateConnectionHandler::new(
            connections.clone(),
            ratings.clone(),
            aggregates.clone(),
        ));
        let upsert_handler = Arc::new(UpsertProblemHandler::new(
            validator,
            problems.clone(),
            connections.clone(),
            rate_handler.clone(),
        ));

        let problems_handlers = ProblemsHandlers::new(
            Arc::new(CreateProblemHandler::new(
                problems.clone(),
                upsert_handler.clone(),
            )),
            Arc::new(UpdateProblemHandler::new(
                problems.clone(),
                upsert_handler.clone(),
            )),
            Arc::new(GetProblemHandler::new(
                problems.clone(),
                connections.clone(),
                ratings.clone(),
            )),
            Arc::new(ListProblemsHandler::new(problems.clone())),
            Arc::new(ConnectProblemsHandler::new(
                problems.clone(),
                connections.clone(),
            )),
            rate_handler.clone(),
            Arc::new(AddRatedConnectionHandler::new(
                problems.clone(),
                connections.clone(),
                ratings.clone(),
                aggregates.clone(),
                rate_handler,
            )),
        );

        let communities_handlers =
            CommunitiesHandlers::new(Arc::new(GetCommunityPayloadHandler::new(
                problems.clone(),
                connections.clone(),
                ratings.clone(),
                aggregates.clone(),
            )));

        let system_handlers = SystemHandlers::new(Arc::new(GetStatsHandler::new(
            problems, connections, ratings, aggregates,
        )));

        Self {
            problems_handlers,
            communities_handlers,
            system_handlers,
            load_handler: LoadDataHandler::new(upsert_handler),
        }
    }
}

fn build_app(config: &AppConfig, wiring: &Wiring) -> Router {
    let cors = cors_layer(config);

    Router::new()
        .merge(system_routes(wiring.system_handlers.clone()))
        .nest("/problems", problems_routes(wiring.problems_handlers.clone()))
        .nest(
            "/communities",
            communities_routes(wiring.communities_handlers.clone()),
        )
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(Duration::from_secs(
                    config.server.request_timeout_secs,
                )))
                .layer(CompressionLayer::new())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(cors),
        )
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
