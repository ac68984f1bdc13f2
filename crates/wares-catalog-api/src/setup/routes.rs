//! Route configuration and setup

use std::sync::Arc;

use axum::{
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

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/health", get(handlers::health))
        .route(
            &format!("{}/auth/login", API_PREFIX),
            post(handlers::auth::login),
        );

    // Protected routes (require a bearer token)
    let protected_routes = Router::new()
        .route(
            &format!("{}/products", API_PREFIX),
            post(handlers::products::create_product),
        )
        .route(
            &format!("{}/products", API_PREFIX),
            get(handlers::products::get_products),
        )
        .route(
            &format!("{}/products/{{id}}", API_PREFIX),
            get(handlers::products::get_product),
        )
        .route(
            &format!("{}/upload/request-url", API_PREFIX),
            post(handlers::upload::request_upload_url),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            crate::auth::middleware::auth_middleware,
        ));

    public_routes
        .merge(protected_routes)
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
