//! Handlers for study-session logging and progress reports.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use flashdeck_core::validation::validate_input;
use flashdeck_db::models::study_session::{
    CreateStudySession, DeckStats, HistoryParams, OverallStats, SessionHistoryEntry,
    StudySession, TagStats,
};
use flashdeck_db::repositories::{DeckRepo, StudySessionRepo, TagRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/reports/sessions
///
/// Record a finished session against one of the caller's decks or tags.
pub async fn record_session(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateStudySession>,
) -> AppResult<(StatusCode, Json<DataResponse<StudySession>>)> {
    validate_input(&input)?;

    if input.deck_id.is_none() && input.tag_id.is_none() {
        return Err(AppError::BadRequest(
            "Either deck_id or tag_id must be provided".into(),
        ));
    }
    if let Some(deck_id) = input.deck_id {
        if !DeckRepo::exists_for_user(&state.pool, auth.user_id, deck_id).await? {
            return Err(AppError::not_found("Deck", deck_id));
        }
    }
    if let Some(tag_id) = input.tag_id {
        if !TagRepo::exists_for_user(&state.pool, auth.user_id, tag_id).await? {
            return Err(AppError::not_found("Tag", tag_id));
        }
    }

    let session = StudySessionRepo::create(&state.pool, auth.user_id, &input).await?;

    tracing::info!(
        session_id = session.id,
        user_id = auth.user_id,
        correct = session.correct_count,
        incorrect = session.incorrect_count,
        "Study session recorded",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: session })))
}

/// GET /api/v1/reports/history
pub async fn history(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> AppResult<Json<DataResponse<Vec<SessionHistoryEntry>>>> {
    let entries = StudySessionRepo::history(&state.pool, auth.user_id, &params).await?;
    Ok(Json(DataResponse { data: entries }))
}

/// GET /api/v1/reports/stats/overall
pub async fn overall(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<OverallStats>>> {
    let stats = StudySessionRepo::overall_stats(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: stats }))
}

/// GET /api/v1/reports/stats/decks
pub async fn by_deck(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<DeckStats>>>> {
    let stats = StudySessionRepo::stats_by_deck(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: stats }))
}

/// GET /api/v1/reports/stats/tags
pub async fn by_tag(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<TagStats>>>> {
    let stats = StudySessionRepo::stats_by_tag(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: stats }))
}
