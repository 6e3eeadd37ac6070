//! Handlers for the `/decks` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use flashdeck_core::types::DbId;
use flashdeck_core::validation::{require_non_blank, validate_input};
use flashdeck_db::models::deck::{CreateDeck, Deck, DeckSummary, UpdateDeck};
use flashdeck_db::repositories::DeckRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/decks
///
/// The caller's decks with total and due card counts.
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<DeckSummary>>>> {
    let decks = DeckRepo::list_for_user(&state.pool, auth.user_id, Utc::now()).await?;
    Ok(Json(DataResponse { data: decks }))
}

/// POST /api/v1/decks
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateDeck>,
) -> AppResult<(StatusCode, Json<DataResponse<Deck>>)> {
    validate_input(&input)?;
    require_non_blank("name", &input.name)?;

    let deck = DeckRepo::create(&state.pool, auth.user_id, &input).await?;

    tracing::info!(deck_id = deck.id, user_id = auth.user_id, "Deck created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: deck })))
}

/// GET /api/v1/decks/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<DeckSummary>>> {
    let deck = DeckRepo::find_summary_for_user(&state.pool, auth.user_id, id, Utc::now())
        .await?
        .ok_or(AppError::not_found("Deck", id))?;
    Ok(Json(DataResponse { data: deck }))
}

/// PUT /api/v1/decks/{id}
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDeck>,
) -> AppResult<Json<DataResponse<Deck>>> {
    if input.is_empty() {
        return Err(AppError::BadRequest(
            "At least one of name or description must be provided".into(),
        ));
    }
    validate_input(&input)?;
    if let Some(name) = &input.name {
        require_non_blank("name", name)?;
    }

    let deck = DeckRepo::update(&state.pool, auth.user_id, id, &input)
        .await?
        .ok_or(AppError::not_found("Deck", id))?;

    tracing::info!(deck_id = id, user_id = auth.user_id, "Deck updated");

    Ok(Json(DataResponse { data: deck }))
}

/// DELETE /api/v1/decks/{id}
///
/// Deletes the deck and all of its cards.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if DeckRepo::delete(&state.pool, auth.user_id, id).await? {
        tracing::info!(deck_id = id, user_id = auth.user_id, "Deck deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Deck", id))
    }
}
