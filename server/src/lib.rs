use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod geo;
pub mod handlers;
pub mod utils;

use config::Config;
use handlers::{admin_login, health, list_businesses, nearby_stores};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/stores/nearby", get(nearby_stores))
        .route("/api/admin/login", post(admin_login))
        .route(
            "/api/admin/businesses",
            get(list_businesses)
                .layer(middleware::from_fn_with_state(state.clone(), auth::require_admin)),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
