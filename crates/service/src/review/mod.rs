pub mod domain;
pub mod memory;
pub mod repository;
pub mod sample;
pub mod schema;
pub mod service;

pub use domain::{parse_id, Review, ReviewInput};
pub use memory::InMemoryReviewRepository;
pub use repository::{ReviewRepository, SeaOrmReviewRepository};
pub use service::ReviewService;
