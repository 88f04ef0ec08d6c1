use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::models::product::Product;

#[async_trait]
pub trait Catalog: Send + Sync {
    async fn get_product(&self, id: Uuid) -> Option<Product>;
}

#[derive(Default)]
pub struct MemoryCatalog {
    products: DashMap<Uuid, Product>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, product: Product) {
        self.products.insert(product.id, product);
    }
}

#[async_trait]
impl Catalog for MemoryCatalog {
    async fn get_product(&self, id: Uuid) -> Option<Product> {
        self.products.get(&id).map(|entry| entry.value().clone())
    }
}
