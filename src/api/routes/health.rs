use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub async fn root() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
