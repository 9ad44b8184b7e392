//! White-label settings

use axum::{body::Bytes, extract::State, http::HeaderMap, Json};
use serde_json::Value;

use menu_core::WhiteLabelSettings;

use super::parse_json;
use crate::auth::SAVE_SETTINGS;
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

/// save-settings - POST /api/v1/settings/save
pub async fn save_settings(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ApiResponse<WhiteLabelSettings>>, ApiError> {
    state.auth.authorize(&headers, SAVE_SETTINGS)?;
    let Value::Object(raw) = parse_json(&body)? else {
        return Err(ApiError::MalformedPayload("settings must be an object".into()));
    };
    Ok(Json(ApiResponse::success(state.store.save_settings(&raw).await?)))
}
