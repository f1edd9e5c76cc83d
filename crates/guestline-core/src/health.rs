use axum::Json;
use axum::http::StatusCode;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthBody {
    pub status: &'static str,
}

/// Handler for `GET /healthz` — liveness only. Readiness lives in each
/// service, next to the resources it has to probe.
pub async fn healthz() -> (StatusCode, Json<HealthBody>) {
    (StatusCode::OK, Json(HealthBody { status: "ok" }))
}
