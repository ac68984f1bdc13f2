use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;
use wares_core::models::{ApiResponse, CreateProductRequest, Product};
use wares_core::AppError;

use crate::auth::models::AuthUser;
use crate::error::HttpAppError;
use crate::state::AppState;

/// Create a product after confirming its image actually exists in storage.
///
/// The existence check is synchronous and not a reservation; no deletion API
/// exists, so check-then-use is safe here.
#[tracing::instrument(
    skip(state, request),
    fields(
        username = %user.username,
        product_name = %request.name,
        image_id = %request.image_id,
        operation = "create_product"
    )
)]
pub async fn create_product(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(request): Json<CreateProductRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    request.validate().map_err(AppError::from)?;

    let image_exists = state.storage.validate_image(request.image_id).await?;
    if !image_exists {
        tracing::warn!("Rejected product: image does not exist");
        return Err(AppError::BadRequest("Invalid image ID".to_string()).into());
    }

    let product = state
        .products
        .insert(Product::new(
            request.name,
            request.description,
            request.price,
            request.image_id,
        ))
        .await;

    tracing::info!(product_id = %product.id, "Product created");

    Ok(Json(ApiResponse::ok(
        "Product created successfully",
        product,
    )))
}

#[tracing::instrument(skip(state, _user), fields(operation = "get_products"))]
pub async fn get_products(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
) -> Result<impl IntoResponse, HttpAppError> {
    let products = state.products.list().await;
    Ok(Json(ApiResponse::ok(
        "Products retrieved successfully",
        products,
    )))
}

#[tracing::instrument(skip(state, _user), fields(product_id = %id, operation = "get_product"))]
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    // A malformed id can never name a product
    let id: Uuid = id
        .parse()
        .map_err(|_| AppError::NotFound("Product not found".to_string()))?;

    let product = state
        .products
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    Ok(Json(ApiResponse::ok(
        "Product retrieved successfully",
        product,
    )))
}
