use axum::{http::StatusCode, Json};
use serde::Serialize;

use menu_shared::constants::PLUGIN_VERSION;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

pub async fn health_check() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            version: PLUGIN_VERSION.to_string(),
        }),
    )
}
