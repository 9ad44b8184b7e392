//! Custom endpoint pages

use axum::{
    extract::{Path, State},
    response::Html,
};

use menu_core::services::EndpointRegistrar;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/v1/account/{slug}
///
/// Only slugs that are both configured and live in the route cache resolve.
pub async fn endpoint_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Html<String>, ApiError> {
    if !state.router.is_routable(&slug) {
        return Err(ApiError::NotFound(format!("route {} is not registered", slug)));
    }

    let items = state.store.load().await?;
    let item = EndpointRegistrar::find_endpoint(&items, &slug)
        .ok_or_else(|| ApiError::NotFound(format!("no custom endpoint {}", slug)))?;

    // No macro engine on this side; placeholders are left for the platform.
    Ok(Html(state.registrar.render_content(item, |c| c.to_string())))
}
