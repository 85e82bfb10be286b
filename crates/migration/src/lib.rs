//! Migrator for the reviews schema.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_review;
mod m20240102_000001_widen_review_text;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_review::Migration),
            Box::new(m20240102_000001_widen_review_text::Migration),
        ]
    }
}
