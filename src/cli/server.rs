//! HTTP server mode serving the paginated sensor feed

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

use crate::auth::ApiKeyGuard;
use crate::config::ServerConfig;
use crate::dataset::DatasetStore;
use crate::error::{Error, Result};
use crate::pagination::Paginator;

/// App state shared across handlers
#[derive(Debug)]
pub struct AppState {
    guard: ApiKeyGuard,
    paginator: Paginator,
    store: DatasetStore,
}

impl AppState {
    /// Assemble handler state from its collaborators
    pub fn new(guard: ApiKeyGuard, paginator: Paginator, store: DatasetStore) -> Self {
        Self {
            guard,
            paginator,
            store,
        }
    }
}

/// Query parameters for `/sensor-data`
#[derive(Debug, Deserialize)]
struct SensorDataQuery {
    cursor: Option<String>,
}

/// Error response wrapper
#[derive(Debug, Serialize)]
struct ApiResponse {
    success: bool,
    error: String,
}

impl ApiResponse {
    fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: msg.into(),
        }
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    // Build CORS layer - allow all origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/sensor-data", get(sensor_data))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Start the HTTP server
pub async fn serve(config: ServerConfig) -> Result<()> {
    config.validate()?;
    config.log_summary();

    let store = DatasetStore::open(&config.data_file, config.reload_policy()).await?;
    let state = AppState::new(config.guard()?, config.paginator()?, store);
    let app = router(state);

    let addr = config.socket_addr();
    info!("Starting HTTP server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::config(format!("Failed to bind to {addr}: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| Error::config(format!("Server error: {e}")))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Serve one page of the dataset
///
/// The credential is checked first, then the query and cursor. The dataset
/// is only touched once both have passed.
async fn sensor_data(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    query: std::result::Result<Query<SensorDataQuery>, QueryRejection>,
) -> Response {
    if let Err(e) = state.guard.check(&headers) {
        warn!("Rejected request: {e}");
        return error_response(&e);
    }

    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            let e = Error::invalid_query(rejection.body_text());
            debug!("Rejected query: {e}");
            return error_response(&e);
        }
    };

    let start = match state.paginator.start_offset(query.cursor.as_deref()) {
        Ok(start) => start,
        Err(e) => {
            debug!(cursor = ?query.cursor, "Rejected cursor: {e}");
            return error_response(&e);
        }
    };

    let dataset = match state.store.current().await {
        Ok(dataset) => dataset,
        Err(e) => {
            error!("Failed to load dataset: {e}");
            return error_response(&e);
        }
    };

    let page = state.paginator.page_at(start, dataset.records());
    debug!(
        start,
        returned = page.len(),
        last = page.is_last(),
        "Serving page"
    );

    (StatusCode::OK, Json(page)).into_response()
}

/// Map an error to its HTTP response
fn error_response(err: &Error) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let message = match err {
        Error::InvalidCursor(_) | Error::InvalidQuery { .. } => err.to_string(),
        Error::Unauthorized { .. } => "Forbidden".to_string(),
        _ => "Failed to load dataset".to_string(),
    };

    (status, Json(ApiResponse::error(message))).into_response()
}
