use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use service::review::Review;
use tracing::debug;

use crate::errors::JsonApiError;
use crate::state::AppState;

#[utoipa::path(
    get, path = "/reviews", tag = "reviews",
    responses(
        (status = 200, description = "All reviews", body = [crate::openapi::ReviewDoc]),
        (status = 500, description = "Store error", body = crate::openapi::ErrorMessageDoc)
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Review>>, JsonApiError> {
    Ok(Json(state.reviews.list().await?))
}

#[utoipa::path(
    post, path = "/reviews", tag = "reviews",
    request_body = crate::openapi::ReviewInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ReviewDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorMessageDoc),
        (status = 500, description = "Store error", body = crate::openapi::ErrorMessageDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Review>), JsonApiError> {
    let Json(body) = payload?;
    debug!(%body, "received review submission");
    let created = state.reviews.create(&body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put, path = "/reviews/{id}", tag = "reviews",
    params(("id" = String, Path, description = "Review id (UUID)")),
    request_body = crate::openapi::ReviewInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ReviewDoc),
        (status = 400, description = "Validation Error or malformed id", body = crate::openapi::ErrorMessageDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorMessageDoc),
        (status = 500, description = "Store error", body = crate::openapi::ErrorMessageDoc)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Review>, JsonApiError> {
    let Json(body) = payload?;
    debug!(%id, %body, "received review update");
    Ok(Json(state.reviews.update(&id, &body).await?))
}

#[utoipa::path(
    delete, path = "/reviews/{id}", tag = "reviews",
    params(("id" = String, Path, description = "Review id (UUID)")),
    responses(
        (status = 200, description = "Deleted review", body = crate::openapi::ReviewDoc),
        (status = 400, description = "Malformed id", body = crate::openapi::ErrorMessageDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorMessageDoc),
        (status = 500, description = "Store error", body = crate::openapi::ErrorMessageDoc)
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Review>, JsonApiError> {
    Ok(Json(state.reviews.delete(&id).await?))
}
