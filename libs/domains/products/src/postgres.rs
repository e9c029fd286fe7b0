use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel, QueryOrder,
    SqlErr, TransactionTrait,
};

use crate::{
    entity,
    error::{ProductError, ProductResult},
    models::{NewProduct, Product, UpdateProduct},
    repository::ProductRepository,
};

pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Constraint violations surface as `DuplicateEntry`; everything else is a
/// storage failure.
fn map_db_err(err: DbErr) -> ProductError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            tracing::warn!("Unique constraint violation: {}", detail);
            ProductError::DuplicateEntry
        }
        _ => ProductError::Database(err),
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, input: NewProduct) -> ProductResult<Product> {
        let active_model: entity::ActiveModel = input.into();

        let model = active_model.insert(&self.db).await.map_err(map_db_err)?;

        tracing::info!(product_id = model.id, "Created product");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(model.map(|m| m.into()))
    }

    async fn list(&self) -> ProductResult<Vec<Product>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn update(&self, id: i32, input: UpdateProduct) -> ProductResult<Product> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let model = entity::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(map_db_err)?
            .ok_or(ProductError::NotFound(id))?;

        let mut active_model = model.into_active_model();
        active_model.apply_update(input);

        let updated = active_model.update(&txn).await.map_err(map_db_err)?;
        txn.commit().await.map_err(map_db_err)?;

        tracing::info!(product_id = id, "Updated product");
        Ok(updated.into())
    }

    async fn delete(&self, id: i32) -> ProductResult<bool> {
        let result = entity::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected > 0 {
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
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn model(id: i32) -> entity::Model {
        entity::Model {
            id,
            name: "Desk lamp".to_string(),
            price: 24.5,
            quantity: 12,
            category: "Lighting".to_string(),
            supplier: "Acme".to_string(),
            img: "https://cdn.example.com/lamp.jpg".to_string(),
        }
    }

    #[tokio::test]
    async fn test_get_by_id_maps_model() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(3)]])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let product = repo.get_by_id(3).await.unwrap().unwrap();
        assert_eq!(product.id, 3);
        assert_eq!(product.name, "Desk lamp");
    }

    #[tokio::test]
    async fn test_update_missing_row_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let input = UpdateProduct {
            name: "Desk lamp".to_string(),
            price: 24.5,
            quantity: 12,
            category: "Lighting".to_string(),
            supplier: "Acme".to_string(),
            img: "https://cdn.example.com/lamp.jpg".to_string(),
        };
        let result = repo.update(9, input).await;
        assert!(matches!(result, Err(ProductError::NotFound(9))));
    }

    #[tokio::test]
    async fn test_delete_reports_rows_affected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();
        let repo = PgProductRepository::new(db);

        assert!(repo.delete(1).await.unwrap());
        assert!(!repo.delete(1).await.unwrap());
    }

    #[test]
    fn test_other_db_errors_stay_database_errors() {
        let err = map_db_err(DbErr::Custom("connection reset".to_string()));
        assert!(matches!(err, ProductError::Database(_)));
    }
}
