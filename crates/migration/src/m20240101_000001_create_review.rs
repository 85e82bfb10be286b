//! Create `review` table.
//! `created_at` is kept apart from the user-visible `date` so listing stays in insertion order.
//! Text columns are unbounded; length is not part of the review contract.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Review::Table)
                    .if_not_exists()
                    .col(uuid(Review::Id).primary_key())
                    .col(text(Review::Title).not_null())
                    .col(text(Review::Artist).not_null())
                    .col(text(Review::Reviewer).not_null())
                    .col(integer(Review::Rating).not_null())
                    .col(text(Review::Review).not_null())
                    .col(text_null(Review::Picture))
                    .col(timestamp_with_time_zone(Review::Date).not_null())
                    .col(timestamp_with_time_zone(Review::CreatedAt).not_null())
                    .check(Expr::col(Review::Rating).between(1, 5))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_review_created_at")
                    .table(Review::Table)
                    .col(Review::CreatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Review::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Review {
    Table,
    Id,
    Title,
    Artist,
    Reviewer,
    Rating,
    Review,
    Picture,
    Date,
    CreatedAt,
}
