use chrono::{DateTime, Utc};
use sea_orm::{
    entity::prelude::*, DatabaseBackend, DatabaseConnection, NotSet, QueryOrder, Set, Statement,
    Unchanged,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "review")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub artist: String,
    #[sea_orm(column_type = "Text")]
    pub reviewer: String,
    pub rating: i32,
    #[sea_orm(column_type = "Text")]
    pub review: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub picture: Option<String>,
    pub date: DateTimeWithTimeZone,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Mutable columns of a review, already validated by the caller.
#[derive(Clone, Debug, PartialEq)]
pub struct Fields {
    pub title: String,
    pub artist: String,
    pub reviewer: String,
    pub rating: i32,
    pub review: String,
    pub picture: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

fn db_err(e: DbErr) -> ModelError {
    ModelError::Db(e.to_string())
}

/// All reviews in insertion order.
pub async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, ModelError> {
    Entity::find()
        .order_by_asc(Column::CreatedAt)
        .order_by_asc(Column::Id)
        .all(db)
        .await
        .map_err(db_err)
}

pub async fn create(db: &DatabaseConnection, fields: Fields) -> Result<Model, ModelError> {
    let now = Utc::now();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(fields.title),
        artist: Set(fields.artist),
        reviewer: Set(fields.reviewer),
        rating: Set(fields.rating),
        review: Set(fields.review),
        picture: Set(fields.picture),
        date: Set(fields.date.unwrap_or(now).into()),
        created_at: Set(now.into()),
    };
    am.insert(db).await.map_err(db_err)
}

/// Replace every mutable column of `id` in one `UPDATE .. RETURNING`.
/// `date` keeps its stored value when not supplied. Returns `None` when no row matched.
pub async fn replace(db: &DatabaseConnection, id: Uuid, fields: Fields) -> Result<Option<Model>, ModelError> {
    let am = ActiveModel {
        id: Unchanged(id),
        title: Set(fields.title),
        artist: Set(fields.artist),
        reviewer: Set(fields.reviewer),
        rating: Set(fields.rating),
        review: Set(fields.review),
        picture: Set(fields.picture),
        date: match fields.date {
            Some(d) => Set(d.into()),
            None => NotSet,
        },
        created_at: NotSet,
    };
    match am.update(db).await {
        Ok(m) => Ok(Some(m)),
        Err(DbErr::RecordNotUpdated) => Ok(None),
        Err(e) => Err(db_err(e)),
    }
}

/// Delete `id` in one `DELETE .. RETURNING` and hand back the removed row.
pub async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<Option<Model>, ModelError> {
    Entity::find()
        .from_raw_sql(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            r#"DELETE FROM "review" WHERE "id" = $1 RETURNING *"#,
            [id.into()],
        ))
        .one(db)
        .await
        .map_err(db_err)
}
