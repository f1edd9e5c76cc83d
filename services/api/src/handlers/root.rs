use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;
use tracing::warn;

use crate::state::AppState;

/// Body for `GET /` — the unauthenticated status endpoint.
#[derive(Debug, Serialize)]
pub struct RootBody {
    pub status: &'static str,
    pub message: &'static str,
    pub version: &'static str,
}

pub async fn root() -> Json<RootBody> {
    Json(RootBody {
        status: "UP",
        message: "Guest Management API is running",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Handler for `GET /readyz` — ready once the database answers a ping.
pub async fn readyz(State(state): State<AppState>) -> StatusCode {
    match state.db.ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            warn!(error = %e, "readiness probe failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
