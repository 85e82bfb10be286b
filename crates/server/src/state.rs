use std::sync::Arc;

use service::review::ReviewService;

/// Shared handler state; cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub reviews: Arc<ReviewService>,
}

impl AppState {
    pub fn new(reviews: ReviewService) -> Self {
        Self { reviews: Arc::new(reviews) }
    }
}
