//! In-memory product catalog.
//!
//! A plain keyed store with no invariant beyond id uniqueness, behind a trait
//! so a persistent backing can be substituted without touching the handlers.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;
use wares_core::models::Product;

#[async_trait]
pub trait ProductCatalog: Send + Sync {
    async fn insert(&self, product: Product) -> Product;

    async fn get(&self, id: Uuid) -> Option<Product>;

    async fn list(&self) -> Vec<Product>;
}

#[derive(Default)]
pub struct MemoryProductCatalog {
    inner: RwLock<HashMap<Uuid, Product>>,
}

impl MemoryProductCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductCatalog for MemoryProductCatalog {
    async fn insert(&self, product: Product) -> Product {
        let mut guard = self.inner.write().expect("product catalog lock poisoned");
        guard.insert(product.id, product.clone());
        product
    }

    async fn get(&self, id: Uuid) -> Option<Product> {
        let guard = self.inner.read().expect("product catalog lock poisoned");
        guard.get(&id).cloned()
    }

    async fn list(&self) -> Vec<Product> {
        let guard = self.inner.read().expect("product catalog lock poisoned");
        let mut products: Vec<Product> = guard.values().cloned().collect();
        // Stable listing order: oldest first
        products.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        products
    }
}
