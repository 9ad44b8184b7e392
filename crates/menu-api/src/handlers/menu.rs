// ============================================================================
// Menu API - Menu Handlers
// File: crates/menu-api/src/handlers/menu.rs
// ============================================================================
//! Admin actions on the stored menu

use std::collections::BTreeMap;

use axum::{body::Bytes, extract::State, http::HeaderMap, Json};
use serde::Serialize;

use menu_core::services::{BuilderBootstrap, ExportPayload, ImportPayload, ImportResult, PartialMenuItem};
use menu_core::MenuItem;

use super::parse_json;
use crate::auth::{EXPORT_MENU, IMPORT_MENU, RESET_MENU, SAVE_MENU};
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct BuilderResponse {
    #[serde(flatten)]
    pub bootstrap: BuilderBootstrap,
    /// Action name to request nonce.
    pub nonces: BTreeMap<String, String>,
}

/// save-menu - POST /api/v1/menu/save
pub async fn save_menu(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ApiResponse<Vec<MenuItem>>>, ApiError> {
    state.auth.authorize(&headers, SAVE_MENU)?;
    let raw = PartialMenuItem::list_from_value(parse_json(&body)?)?;
    let items = state.store.save(&raw).await?;
    Ok(Json(ApiResponse::success(items)))
}

/// export-menu - GET /api/v1/menu/export
pub async fn export_menu(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<ExportPayload>>, ApiError> {
    state.auth.authorize(&headers, EXPORT_MENU)?;
    Ok(Json(ApiResponse::success(state.store.export().await?)))
}

/// import-menu - POST /api/v1/menu/import
pub async fn import_menu(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ApiResponse<ImportResult>>, ApiError> {
    state.auth.authorize(&headers, IMPORT_MENU)?;
    let payload = ImportPayload::from_value(parse_json(&body)?)?;
    Ok(Json(ApiResponse::success(state.store.import(payload).await?)))
}

/// POST /api/v1/menu/reset
pub async fn reset_menu(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<Vec<MenuItem>>>, ApiError> {
    state.auth.authorize(&headers, RESET_MENU)?;
    Ok(Json(ApiResponse::success(state.store.reset().await?)))
}

/// GET /api/v1/menu/builder
pub async fn builder(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<BuilderResponse>>, ApiError> {
    let caller = state.auth.authorize_builder(&headers)?;
    let bootstrap = state.store.builder_bootstrap().await?;
    let nonces = state.auth.nonces_for(&caller)?;
    Ok(Json(ApiResponse::success(BuilderResponse { bootstrap, nonces })))
}
