use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{NewProduct, Product, UpdateProduct};

/// Repository trait for Product persistence
///
/// Ids are assigned by the store on insert and never reused by it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a product and return it with its new id
    async fn create(&self, input: NewProduct) -> ProductResult<Product>;

    /// Get a product by ID
    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>>;

    /// All products, ordered by id
    async fn list(&self) -> ProductResult<Vec<Product>>;

    /// Replace every field of an existing product
    async fn update(&self, id: i32, input: UpdateProduct) -> ProductResult<Product>;

    /// Delete a product by ID, returning whether a row was removed
    async fn delete(&self, id: i32) -> ProductResult<bool>;
}

#[derive(Debug, Default)]
struct Store {
    products: BTreeMap<i32, Product>,
    last_id: i32,
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: NewProduct) -> ProductResult<Product> {
        let mut store = self.store.write().await;

        store.last_id = store
            .last_id
            .checked_add(1)
            .ok_or_else(|| ProductError::Internal("product id space exhausted".to_string()))?;

        let product = Product {
            id: store.last_id,
            name: input.name,
            price: input.price,
            quantity: input.quantity,
            category: input.category,
            supplier: input.supplier,
            img: input.img,
        };
        store.products.insert(product.id, product.clone());

        tracing::info!(product_id = product.id, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let store = self.store.read().await;
        Ok(store.products.get(&id).cloned())
    }

    async fn list(&self) -> ProductResult<Vec<Product>> {
        let store = self.store.read().await;
        Ok(store.products.values().cloned().collect())
    }

    async fn update(&self, id: i32, input: UpdateProduct) -> ProductResult<Product> {
        let mut store = self.store.write().await;

        let product = store
            .products
            .get_mut(&id)
            .ok_or(ProductError::NotFound(id))?;

        product.name = input.name;
        product.price = input.price;
        product.quantity = input.quantity;
        product.category = input.category;
        product.supplier = input.supplier;
        product.img = input.img;

        tracing::info!(product_id = id, "Updated product");
        Ok(product.clone())
    }

    async fn delete(&self, id: i32) -> ProductResult<bool> {
        let mut store = self.store.write().await;

        if store.products.remove(&id).is_some() {
            tracing::info!(product_id = id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_product(name: &str) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            price: 9.99,
            quantity: 3,
            category: "Kitchen".to_string(),
            supplier: "Acme".to_string(),
            img: format!("https://cdn.example.com/{}.jpg", name),
        }
    }

    fn update(name: &str) -> UpdateProduct {
        UpdateProduct {
            name: name.to_string(),
            price: 1.5,
            quantity: 0,
            category: "Garden".to_string(),
            supplier: "Globex".to_string(),
            img: "https://cdn.example.com/new.jpg".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_product() {
        let repo = InMemoryProductRepository::new();

        let product = repo.create(new_product("kettle")).await.unwrap();
        assert_eq!(product.id, 1);
        assert_eq!(product.name, "kettle");

        let fetched = repo.get_by_id(product.id).await.unwrap();
        assert_eq!(fetched, Some(product));
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let repo = InMemoryProductRepository::new();

        let first = repo.create(new_product("kettle")).await.unwrap();
        assert!(repo.delete(first.id).await.unwrap());

        let second = repo.create(new_product("toaster")).await.unwrap();
        assert_eq!(second.id, first.id + 1);
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_id() {
        let repo = InMemoryProductRepository::new();
        for name in ["a", "b", "c"] {
            repo.create(new_product(name)).await.unwrap();
        }

        let ids: Vec<i32> = repo.list().await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_update_replaces_all_fields() {
        let repo = InMemoryProductRepository::new();
        let product = repo.create(new_product("kettle")).await.unwrap();

        let updated = repo.update(product.id, update("pot")).await.unwrap();
        assert_eq!(updated.id, product.id);
        assert_eq!(updated.name, "pot");
        assert_eq!(updated.quantity, 0);
        assert_eq!(updated.supplier, "Globex");
        assert_eq!(updated.img, "https://cdn.example.com/new.jpg");
    }

    #[tokio::test]
    async fn test_update_missing_product() {
        let repo = InMemoryProductRepository::new();

        let result = repo.update(42, update("pot")).await;
        assert!(matches!(result, Err(ProductError::NotFound(42))));
    }

    #[tokio::test]
    async fn test_delete_missing_product() {
        let repo = InMemoryProductRepository::new();
        assert!(!repo.delete(1).await.unwrap());
    }
}
