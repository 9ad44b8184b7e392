//! Per-viewer navigation feed for the storefront adapter

use axum::{extract::State, http::HeaderMap, Json};
use indexmap::IndexMap;
use serde::Serialize;

use menu_core::services::{Destination, FrontendItem, NavigationProjector};
use menu_core::Viewer;

use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct NavigationResponse {
    /// False when nothing is visible and the platform's own menu stays.
    pub replaces_host_menu: bool,
    /// Key to title, in display order.
    pub items: IndexMap<String, String>,
    pub destinations: IndexMap<String, Destination>,
    pub config: IndexMap<String, FrontendItem>,
    pub separator_css: String,
}

/// GET /api/v1/navigation
pub async fn navigation(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<NavigationResponse>>, ApiError> {
    let viewer = match state.auth.optional_caller(&headers)? {
        Some(caller) => Viewer::customer(caller.user_id, caller.roles),
        None => Viewer::anonymous(),
    };

    let items = state.store.load().await?;
    let navigation = NavigationProjector::project(&items, &viewer.roles);
    let badges = state.badges.resolve_all(&navigation, &viewer).await;

    Ok(Json(ApiResponse::success(NavigationResponse {
        replaces_host_menu: !navigation.is_empty(),
        items: navigation.titles(),
        destinations: navigation
            .iter()
            .map(|(key, entry)| (key.to_string(), entry.destination.clone()))
            .collect(),
        config: navigation.frontend_config(&badges),
        separator_css: navigation.separator_css(),
    })))
}
