//! Route configuration and setup

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use wares_core::constants::API_PREFIX;

use crate::handlers;
use crate::state::AppState;

/// Setup all application routes
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.cors_origins);
    let max_upload_bytes = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(handlers::health))
        .route(
            &format!("{}/storage/presigned-url", API_PREFIX),
            post(handlers::presigned_url::generate_presigned_url),
        )
        .route(
            &format!("{}/storage/upload/{{token}}", API_PREFIX),
            post(handlers::upload::upload_file).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route(
            &format!("{}/storage/validate-image", API_PREFIX),
            post(handlers::validate_image::validate_image),
        )
        .route(
            &format!("{}/storage/image/{{image_id}}", API_PREFIX),
            get(handlers::image_get::get_image),
        )
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
