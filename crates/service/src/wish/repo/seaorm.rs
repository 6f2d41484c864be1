use sea_orm::DatabaseConnection;

use crate::errors::ServiceError;
use crate::wish::repository::WishRepository;
use crate::wish::{UpsertOutcome, Wish};

/// PostgreSQL-backed repository over the `twishes` table.
pub struct SeaOrmWishRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl WishRepository for SeaOrmWishRepository {
    async fn list(&self) -> Result<Vec<Wish>, ServiceError> {
        Ok(models::wish::list(&self.db).await?)
    }

    async fn exists(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(models::wish::exists(&self.db, id).await?)
    }

    async fn upsert(&self, wish: Wish) -> Result<UpsertOutcome, ServiceError> {
        Ok(models::wish::upsert(&self.db, wish).await?)
    }
}
