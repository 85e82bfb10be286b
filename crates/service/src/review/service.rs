use std::{future::Future, sync::Arc, time::Duration};

use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use crate::errors::ServiceError;
use crate::review::domain::{parse_id, Review, ReviewInput};
use crate::review::repository::ReviewRepository;

pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(10);

/// Application service encapsulating the review contract.
/// Validation and id parsing happen before the repository is touched,
/// and each repository call is bounded by `timeout`.
///
/// Mutations run on their own task, so dropping the request future (a client
/// hanging up) or hitting the timeout does not abort a write already issued.
pub struct ReviewService<R: ReviewRepository + ?Sized = dyn ReviewRepository> {
    repo: Arc<R>,
    timeout: Duration,
}

/// Await a detached store task; a panicked or aborted task is a storage failure.
async fn joined<T>(task: JoinHandle<Result<T, ServiceError>>) -> Result<T, ServiceError> {
    task.await.map_err(|e| ServiceError::Db(format!("store task failed: {e}")))?
}

impl<R: ReviewRepository + ?Sized + 'static> ReviewService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo, timeout: DEFAULT_STORE_TIMEOUT } }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn bounded<T, F>(&self, op: &'static str, fut: F) -> Result<T, ServiceError>
    where
        F: Future<Output = Result<T, ServiceError>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(res) => res,
            Err(_) => {
                warn!(op, timeout_ms = self.timeout.as_millis() as u64, "store call timed out");
                Err(ServiceError::Timeout(op))
            }
        }
    }

    pub async fn list(&self) -> Result<Vec<Review>, ServiceError> {
        let list = self.bounded("list", self.repo.list()).await?;
        debug!(count = list.len(), "listed reviews");
        Ok(list)
    }

    #[instrument(skip_all)]
    pub async fn create(&self, body: &Value) -> Result<Review, ServiceError> {
        let input = ReviewInput::from_json(body)?;
        let repo = Arc::clone(&self.repo);
        let task = tokio::spawn(async move { repo.insert(input).await });
        let created = self.bounded("insert", joined(task)).await?;
        info!(review_id = %created.id, "created review");
        Ok(created)
    }

    /// Full replacement; never creates a review for an unknown id.
    #[instrument(skip(self, body))]
    pub async fn update(&self, raw_id: &str, body: &Value) -> Result<Review, ServiceError> {
        let id = parse_id(raw_id)?;
        let input = ReviewInput::from_json(body)?;
        let repo = Arc::clone(&self.repo);
        let task = tokio::spawn(async move { repo.replace(id, input).await });
        let updated = self
            .bounded("replace", joined(task))
            .await?
            .ok_or_else(|| ServiceError::not_found("review"))?;
        info!(review_id = %id, "updated review");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, raw_id: &str) -> Result<Review, ServiceError> {
        let id = parse_id(raw_id)?;
        let repo = Arc::clone(&self.repo);
        let task = tokio::spawn(async move { repo.remove(id).await });
        let removed = self
            .bounded("remove", joined(task))
            .await?
            .ok_or_else(|| ServiceError::not_found("review"))?;
        info!(review_id = %id, "deleted review");
        Ok(removed)
    }
}
