//! Study sets and bulk resets for deck and tag scopes.

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use flashdeck_core::due::DueScope;
use flashdeck_core::scheduler;
use flashdeck_core::types::DbId;
use flashdeck_db::models::card::CardWithTags;
use serde::Serialize;

use crate::error::AppResult;
use crate::handlers::cards::with_tags;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Due cards for one scope, in study order.
#[derive(Debug, Serialize)]
pub struct StudySet {
    pub scope: DueScope,
    pub items: Vec<CardWithTags>,
    pub total: usize,
}

/// Result of a bulk reset.
#[derive(Debug, Serialize)]
pub struct ResetSummary {
    pub scope: DueScope,
    pub updated: u64,
}

async fn study(state: &AppState, user_id: DbId, scope: DueScope) -> AppResult<StudySet> {
    let store = state.review_store();
    let due = scheduler::get_due_cards(&store, user_id, scope, Utc::now()).await?;
    let items = with_tags(&state.pool, due.items).await?;
    Ok(StudySet {
        scope,
        items,
        total: due.total,
    })
}

async fn reset(state: &AppState, user_id: DbId, scope: DueScope) -> AppResult<ResetSummary> {
    let store = state.review_store();
    let updated = scheduler::reset_scope(&store, user_id, scope).await?;

    tracing::info!(
        user_id,
        scope = scope.entity(),
        scope_id = scope.id(),
        updated,
        "Cards reset",
    );

    Ok(ResetSummary { scope, updated })
}

/// GET /api/v1/decks/{id}/study
pub async fn deck_study(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<StudySet>>> {
    let set = study(&state, auth.user_id, DueScope::Deck(id)).await?;
    Ok(Json(DataResponse { data: set }))
}

/// GET /api/v1/tags/{id}/study
pub async fn tag_study(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<StudySet>>> {
    let set = study(&state, auth.user_id, DueScope::Tag(id)).await?;
    Ok(Json(DataResponse { data: set }))
}

/// POST /api/v1/decks/{id}/reset
pub async fn deck_reset(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ResetSummary>>> {
    let summary = reset(&state, auth.user_id, DueScope::Deck(id)).await?;
    Ok(Json(DataResponse { data: summary }))
}

/// POST /api/v1/tags/{id}/reset
pub async fn tag_reset(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ResetSummary>>> {
    let summary = reset(&state, auth.user_id, DueScope::Tag(id)).await?;
    Ok(Json(DataResponse { data: summary }))
}
