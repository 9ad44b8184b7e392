//! Router assembly

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::handlers::{account, health, menu, navigation, settings};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route("/api/v1/menu/save", post(menu::save_menu))
        .route("/api/v1/menu/export", get(menu::export_menu))
        .route("/api/v1/menu/import", post(menu::import_menu))
        .route("/api/v1/menu/reset", post(menu::reset_menu))
        .route("/api/v1/menu/builder", get(menu::builder))
        .route("/api/v1/settings/save", post(settings::save_settings));

    let storefront_routes = Router::new()
        .route("/api/v1/navigation", get(navigation::navigation))
        .route("/api/v1/account/{slug}", get(account::endpoint_page));

    Router::new()
        .route("/health", get(health::health_check))
        .merge(admin_routes)
        .merge(storefront_routes)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}
