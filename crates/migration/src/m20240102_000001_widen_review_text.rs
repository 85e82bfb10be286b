//! Widen `review` text columns created as bounded varchar by earlier schemas.
//! A no-op on tables that already use `text`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Review::Table)
                    .modify_column(text(Review::Title))
                    .modify_column(text(Review::Artist))
                    .modify_column(text(Review::Reviewer))
                    .modify_column(text_null(Review::Picture))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, _manager: &SchemaManager) -> Result<(), DbErr> {
        // narrowing could truncate stored reviews
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Review {
    Table,
    Title,
    Artist,
    Reviewer,
    Picture,
}
