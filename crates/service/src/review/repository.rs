use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::review::domain::{Review, ReviewInput};

/// Store abstraction for reviews. Every method touches at most one record.
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// All reviews in insertion order.
    async fn list(&self) -> Result<Vec<Review>, ServiceError>;
    /// Persist a new review under a freshly generated id.
    async fn insert(&self, input: ReviewInput) -> Result<Review, ServiceError>;
    /// Replace the mutable fields of `id`; `None` when it does not exist.
    async fn replace(&self, id: Uuid, input: ReviewInput) -> Result<Option<Review>, ServiceError>;
    /// Remove `id` and return what was removed; `None` when it does not exist.
    async fn remove(&self, id: Uuid) -> Result<Option<Review>, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmReviewRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmReviewRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl ReviewRepository for SeaOrmReviewRepository {
    async fn list(&self) -> Result<Vec<Review>, ServiceError> {
        let rows = models::review::list(&self.db).await?;
        Ok(rows.into_iter().map(Review::from).collect())
    }

    async fn insert(&self, input: ReviewInput) -> Result<Review, ServiceError> {
        Ok(models::review::create(&self.db, input.into()).await?.into())
    }

    async fn replace(&self, id: Uuid, input: ReviewInput) -> Result<Option<Review>, ServiceError> {
        Ok(models::review::replace(&self.db, id, input.into()).await?.map(Review::from))
    }

    async fn remove(&self, id: Uuid) -> Result<Option<Review>, ServiceError> {
        Ok(models::review::delete(&self.db, id).await?.map(Review::from))
    }
}
