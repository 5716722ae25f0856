//! HTTP boundary: axum router and handlers
//!
//! The handlers own the mapping from engine results to status codes and
//! JSON bodies; the engine itself knows nothing about HTTP.

use crate::config::ServiceConfig;
use crate::engine::{self, ReplicationOutcome};
use crate::error::Result;
use crate::request;
use crate::store::{DestinationStore, GcsStore, S3Store, SourceStore};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared application state: the two storage ports, constructed once at
/// startup and injected into every request
#[derive(Clone)]
pub struct AppState {
    source: Arc<dyn SourceStore>,
    destination: Arc<dyn DestinationStore>,
}

impl AppState {
    /// Build state from explicit store instances (tests inject fakes here)
    pub fn new(source: Arc<dyn SourceStore>, destination: Arc<dyn DestinationStore>) -> Self {
        Self {
            source,
            destination,
        }
    }

    /// Build the production state: S3 source, GCS destination
    pub async fn from_config(config: &ServiceConfig) -> Result<Self> {
        let source = S3Store::new(config.s3.clone()).await?;
        let destination = GcsStore::new(&config.destination_bucket).await?;
        Ok(Self::new(Arc::new(source), Arc::new(destination)))
    }
}

/// Build the service router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/v1/replicate", post(replicate_handler))
        .route("/v1/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "ferry",
        "version": crate::VERSION
    }))
}

/// Replicate one object from the source store to the destination store
///
/// Expects JSON with `s3_bucket` and `s3_key`.
async fn replicate_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Response {
    let Ok(Json(payload)) = payload else {
        return error_response(StatusCode::BAD_REQUEST, "request body must be valid JSON");
    };

    let request = match request::validate(&payload) {
        Ok(request) => request,
        Err(err) => return error_response(StatusCode::BAD_REQUEST, &err.to_string()),
    };

    match engine::replicate(&request, state.source.as_ref(), state.destination.as_ref()).await {
        Ok(ReplicationOutcome::AlreadyExists) => {
            (StatusCode::OK, Json(json!({ "status": "already exists" }))).into_response()
        }
        Ok(ReplicationOutcome::Completed { .. }) => {
            (StatusCode::OK, Json(json!({ "status": "success" }))).into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, "replication failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

/// Bind and run the service until the process exits
pub async fn run_server(config: &ServiceConfig, state: AppState) -> Result<()> {
    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("ferry listening on http://{addr}");

    axum::serve(listener, router(state)).await?;
    Ok(())
}
