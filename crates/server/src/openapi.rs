use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ErrorMessageDoc { pub message: String }

/// Submission body for create and full replacement. Unknown keys are ignored.
#[derive(ToSchema)]
pub struct ReviewInputDoc {
    pub title: String,
    pub artist: String,
    pub reviewer: String,
    /// Whole number in 1..=5
    pub rating: i32,
    pub review: String,
    pub picture: Option<String>,
    /// RFC 3339; defaults to the insertion time
    pub date: Option<String>,
}

#[derive(ToSchema)]
pub struct ReviewDoc {
    pub id: Uuid,
    pub title: String,
    pub artist: String,
    pub reviewer: String,
    pub rating: i32,
    pub review: String,
    pub picture: Option<String>,
    pub date: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::reviews::list,
        crate::routes::reviews::create,
        crate::routes::reviews::update,
        crate::routes::reviews::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorMessageDoc,
            ReviewInputDoc,
            ReviewDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "reviews")
    )
)]
pub struct ApiDoc;
