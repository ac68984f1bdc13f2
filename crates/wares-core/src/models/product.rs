use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A catalog product. Lives only in process memory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    /// Image id previously returned by the storage service
    pub image_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Product {
    pub fn new(name: String, description: String, price: Decimal, image_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            description,
            price,
            image_id,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Product name must be between 1 and 255 characters"
    ))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    pub image_id: Uuid,
}
