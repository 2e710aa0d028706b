//! HTTP route handlers.

use std::sync::Arc;

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, warn};

use crate::network::{LineRecord, NetworkError, NetworkSnapshot, StopRecord, stops_from_records};
use crate::planner::{Planner, SearchError, StopRegistry, TransitGraph};

use super::dto::*;
use super::state::AppState;

/// Message returned to clients when the data service fails.
const NETWORK_UNAVAILABLE: &str = "failed to load network data";

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/stops", get(list_stops))
        .route("/api/lines", get(list_lines))
        .route("/api/nearest", post(nearest_stop))
        .route("/api/route", post(plan_route))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List every stop as stored.
async fn list_stops(State(state): State<AppState>) -> Result<Json<Vec<StopRecord>>, AppError> {
    let snapshot = load(&state).await?;
    Ok(Json(snapshot.stops.clone()))
}

/// List every line as stored.
async fn list_lines(State(state): State<AppState>) -> Result<Json<Vec<LineRecord>>, AppError> {
    let snapshot = load(&state).await?;
    Ok(Json(snapshot.lines.clone()))
}

/// Find the stop closest to a coordinate.
async fn nearest_stop(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<NearestStopResponse>, AppError> {
    let req: NearestStopRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(&body), "Rejected nearest-stop request");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let at = req.coordinate().map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;

    let snapshot = load(&state).await?;
    let registry = StopRegistry::from_stops(stops_from_records(&snapshot.stops));

    let Some(&(stop, distance_m)) = registry.nearest(&at, 1).first() else {
        return Err(SearchError::EmptyNetwork.into());
    };
    debug!(stop = %stop.id, distance_m, "Resolved nearest stop");

    Ok(Json(NearestStopResponse::new(stop, distance_m)))
}

/// Plan a route between two coordinates.
async fn plan_route(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PlanRouteResponse>, AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: PlanRouteRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(&body), "Rejected route request");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let (from, to) = req.coordinates().map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;

    let snapshot = load(&state).await?;
    let config = state.config.clone();

    // Graph construction and search are CPU-bound.
    let outcome = tokio::task::spawn_blocking(move || {
        let graph = TransitGraph::from_snapshot(&snapshot, &config);
        Planner::new(&graph, &config).plan(&from, &to)
    })
    .await
    .map_err(|e| AppError::Internal {
        message: format!("planning task failed: {e}"),
    })??;

    Ok(Json(PlanRouteResponse::from_outcome(&outcome)))
}

async fn load(state: &AppState) -> Result<Arc<NetworkSnapshot>, AppError> {
    state.network.snapshot().await.map_err(AppError::from)
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl From<NetworkError> for AppError {
    fn from(e: NetworkError) -> Self {
        // The detail stays in the log; clients get a generic message.
        error!(error = %e, "Network data load failed");
        AppError::Internal {
            message: NETWORK_UNAVAILABLE.to_string(),
        }
    }
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "Request failed");
        } else {
            warn!(%status, %message, "Request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
