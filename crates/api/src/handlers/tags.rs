//! Handlers for the `/tags` resource.
//!
//! Tag names are unique per user; a duplicate create surfaces as 409 through
//! the `uq_tags_user_name` constraint.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use flashdeck_core::types::DbId;
use flashdeck_core::validation::normalize_tag_name;
use flashdeck_db::models::tag::{CreateTag, Tag};
use flashdeck_db::repositories::TagRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/tags
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Tag>>>> {
    let tags = TagRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: tags }))
}

/// POST /api/v1/tags
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateTag>,
) -> AppResult<(StatusCode, Json<DataResponse<Tag>>)> {
    let name = normalize_tag_name(&input.name)?;
    let tag = TagRepo::create(&state.pool, auth.user_id, &name).await?;

    tracing::info!(tag_id = tag.id, user_id = auth.user_id, "Tag created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: tag })))
}

/// DELETE /api/v1/tags/{id}
///
/// Removes the tag from every card; the cards themselves are kept.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if TagRepo::delete(&state.pool, auth.user_id, id).await? {
        tracing::info!(tag_id = id, user_id = auth.user_id, "Tag deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Tag", id))
    }
}
