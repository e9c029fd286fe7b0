pub use sea_orm_migration::prelude::*;

mod m20241001_000000_create_products;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20241001_000000_create_products::Migration)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_products_migration_registered() {
        let migrations = Migrator::migrations();
        assert_eq!(migrations.len(), 1);
        assert_eq!(migrations[0].name(), "m20241001_000000_create_products");
    }
}
