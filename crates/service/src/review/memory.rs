use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::review::domain::{Review, ReviewInput};
use crate::review::repository::ReviewRepository;
use crate::review::sample;

/// In-process store keeping reviews in insertion order.
///
/// The lock is held for the whole of each operation, so concurrent inserts
/// never observe each other half-way and a removal cannot race an insert.
#[derive(Default)]
pub struct InMemoryReviewRepository {
    reviews: Mutex<Vec<Review>>,
}

impl InMemoryReviewRepository {
    pub fn new() -> Self { Self::default() }

    pub fn with_reviews(reviews: Vec<Review>) -> Self {
        Self { reviews: Mutex::new(reviews) }
    }

    /// Pre-filled with the sample music catalogue.
    pub fn seeded() -> Self {
        let now = Utc::now();
        let reviews = sample::catalogue()
            .into_iter()
            .map(|input| input.into_review(Uuid::new_v4(), now))
            .collect();
        Self::with_reviews(reviews)
    }
}

#[async_trait]
impl ReviewRepository for InMemoryReviewRepository {
    async fn list(&self) -> Result<Vec<Review>, ServiceError> {
        Ok(self.reviews.lock().await.clone())
    }

    async fn insert(&self, input: ReviewInput) -> Result<Review, ServiceError> {
        let mut reviews = self.reviews.lock().await;
        let mut id = Uuid::new_v4();
        while reviews.iter().any(|r| r.id == id) {
            id = Uuid::new_v4();
        }
        let review = input.into_review(id, Utc::now());
        reviews.push(review.clone());
        Ok(review)
    }

    async fn replace(&self, id: Uuid, input: ReviewInput) -> Result<Option<Review>, ServiceError> {
        let mut reviews = self.reviews.lock().await;
        Ok(reviews.iter_mut().find(|r| r.id == id).map(|existing| {
            input.apply_to(existing);
            existing.clone()
        }))
    }

    async fn remove(&self, id: Uuid) -> Result<Option<Review>, ServiceError> {
        let mut reviews = self.reviews.lock().await;
        Ok(reviews
            .iter()
            .position(|r| r.id == id)
            .map(|idx| reviews.remove(idx)))
    }
}
