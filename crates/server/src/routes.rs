use std::sync::Arc;

use axum::{http::StatusCode, routing::get, Json, Router};
use sea_orm::DatabaseConnection;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::{metrics, types::Health};
use service::person::{repo::seaorm::SeaOrmPersonRepository, PersonService};

use crate::openapi::ApiDoc;

pub mod person;

#[derive(Clone)]
pub struct AppState {
    pub persons: Arc<PersonService>,
}

impl AppState {
    pub fn new(persons: Arc<PersonService>) -> Self { Self { persons } }

    /// Wire the SeaORM store into the person service.
    pub fn from_db(db: DatabaseConnection) -> Self {
        let repo = Arc::new(SeaOrmPersonRepository::new(db));
        Self::new(Arc::new(PersonService::new(repo)))
    }
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn metrics_handler() -> (StatusCode, String) {
    metrics::encode_metrics()
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: person CRUD plus health, metrics and API docs
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let persons = Router::new()
        .route("/person", axum::routing::post(person::create).put(person::update))
        .route("/person/all", get(person::find_all))
        .route("/person/search", get(person::search))
        .route("/person/:id", get(person::find_by_id).delete(person::delete));

    let ops = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics_handler))
        .route("/api-docs/openapi.json", get(openapi_json));

    persons
        .merge(ops)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // status and latency
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
