//! Handlers for cards: CRUD, rating, reset, and card-tag associations.
//!
//! Cards are always reached through the caller's decks; a card in someone
//! else's deck is reported as missing.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use flashdeck_core::error::CoreError;
use flashdeck_core::scheduler::{self, RatingOutcome};
use flashdeck_core::types::DbId;
use flashdeck_core::validation::{normalize_tag_name, require_non_blank, validate_input};
use flashdeck_db::models::card::{Card, CardWithTags, CreateCard, UpdateCard};
use flashdeck_db::models::tag::{AttachTagRequest, TagInfo};
use flashdeck_db::repositories::{CardRepo, DeckRepo, TagRepo};
use flashdeck_db::DbPool;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for rating a card.
///
/// The rating is kept as raw JSON so that strings, fractions and a missing
/// field are answered with a validation error instead of an extractor rejection.
#[derive(Debug, Deserialize)]
pub struct RateCardRequest {
    #[serde(default)]
    pub rating: serde_json::Value,
}

impl RateCardRequest {
    /// The rating as an integer; range checking happens in the scheduler.
    fn rating(&self) -> Result<i64, CoreError> {
        self.rating.as_i64().ok_or_else(|| {
            CoreError::Validation("rating must be an integer between 1 and 5".to_string())
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Pair each card with its tags using a single tag query, keeping card order.
pub(crate) async fn with_tags(pool: &DbPool, cards: Vec<Card>) -> AppResult<Vec<CardWithTags>> {
    let ids: Vec<DbId> = cards.iter().map(|c| c.id).collect();
    let mut by_card: HashMap<DbId, Vec<TagInfo>> = HashMap::new();
    for row in TagRepo::tags_for_cards(pool, &ids).await? {
        by_card.entry(row.card_id).or_default().push(TagInfo {
            id: row.id,
            name: row.name,
        });
    }

    Ok(cards
        .into_iter()
        .map(|card| {
            let tags = by_card.remove(&card.id).unwrap_or_default();
            CardWithTags { card, tags }
        })
        .collect())
}

/// Normalize and de-duplicate tag names, preserving first-seen order.
fn normalize_tag_names(names: &[String]) -> AppResult<Vec<String>> {
    let mut out: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        let name = normalize_tag_name(name)?;
        if !out.contains(&name) {
            out.push(name);
        }
    }
    Ok(out)
}

async fn load_owned_card(state: &AppState, user_id: DbId, card_id: DbId) -> AppResult<Card> {
    CardRepo::find_for_user(&state.pool, user_id, card_id)
        .await?
        .ok_or(AppError::not_found("Card", card_id))
}

// ---------------------------------------------------------------------------
// Card CRUD
// ---------------------------------------------------------------------------

/// GET /api/v1/decks/{id}/cards
pub async fn list_for_deck(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(deck_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<CardWithTags>>>> {
    if !DeckRepo::exists_for_user(&state.pool, auth.user_id, deck_id).await? {
        return Err(AppError::not_found("Deck", deck_id));
    }

    let cards = CardRepo::list_in_deck_for_user(&state.pool, auth.user_id, deck_id).await?;
    let cards = with_tags(&state.pool, cards).await?;

    Ok(Json(DataResponse { data: cards }))
}

/// POST /api/v1/decks/{id}/cards
///
/// Create a card in the `new` tier. Tag names are created on first use.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(deck_id): Path<DbId>,
    Json(input): Json<CreateCard>,
) -> AppResult<(StatusCode, Json<DataResponse<CardWithTags>>)> {
    validate_input(&input)?;
    require_non_blank("front", &input.front)?;
    require_non_blank("back", &input.back)?;
    let tag_names = normalize_tag_names(&input.tags)?;

    if !DeckRepo::exists_for_user(&state.pool, auth.user_id, deck_id).await? {
        return Err(AppError::not_found("Deck", deck_id));
    }

    let card = CardRepo::create_with_tags(
        &state.pool,
        auth.user_id,
        deck_id,
        &input.front,
        &input.back,
        &tag_names,
    )
    .await?;

    tracing::info!(
        card_id = card.id,
        deck_id,
        user_id = auth.user_id,
        tag_count = tag_names.len(),
        "Card created",
    );

    let tags = TagRepo::tags_for_card(&state.pool, card.id).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: CardWithTags { card, tags },
        }),
    ))
}

/// GET /api/v1/cards/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<CardWithTags>>> {
    let card = load_owned_card(&state, auth.user_id, id).await?;
    let tags = TagRepo::tags_for_card(&state.pool, card.id).await?;
    Ok(Json(DataResponse {
        data: CardWithTags { card, tags },
    }))
}

/// PUT /api/v1/cards/{id}
///
/// Update front, back, and/or the full tag set. Review fields are untouched.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCard>,
) -> AppResult<Json<DataResponse<CardWithTags>>> {
    if input.front.is_none() && input.back.is_none() && input.tags.is_none() {
        return Err(AppError::BadRequest(
            "At least one of front, back or tags must be provided".into(),
        ));
    }
    validate_input(&input)?;
    if let Some(front) = &input.front {
        require_non_blank("front", front)?;
    }
    if let Some(back) = &input.back {
        require_non_blank("back", back)?;
    }
    let tag_names = input.tags.as_deref().map(normalize_tag_names).transpose()?;

    let card = CardRepo::update_content(
        &state.pool,
        auth.user_id,
        id,
        input.front.as_deref(),
        input.back.as_deref(),
        tag_names.as_deref(),
    )
    .await?
    .ok_or(AppError::not_found("Card", id))?;

    tracing::info!(card_id = id, user_id = auth.user_id, "Card updated");

    let tags = TagRepo::tags_for_card(&state.pool, card.id).await?;
    Ok(Json(DataResponse {
        data: CardWithTags { card, tags },
    }))
}

/// DELETE /api/v1/cards/{id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if CardRepo::delete(&state.pool, auth.user_id, id).await? {
        tracing::info!(card_id = id, user_id = auth.user_id, "Card deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Card", id))
    }
}

// ---------------------------------------------------------------------------
// Scheduling
// ---------------------------------------------------------------------------

/// POST /api/v1/cards/{id}/difficulty
///
/// Apply a 1-5 recall rating and reschedule the card.
pub async fn rate(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<RateCardRequest>,
) -> AppResult<Json<DataResponse<RatingOutcome>>> {
    let rating = input.rating()?;
    let store = state.review_store();
    let outcome = scheduler::rate_card(&store, auth.user_id, id, rating, Utc::now()).await?;

    tracing::info!(
        card_id = id,
        user_id = auth.user_id,
        rating,
        difficulty = %outcome.difficulty,
        "Card rated",
    );

    Ok(Json(DataResponse { data: outcome }))
}

/// POST /api/v1/cards/{id}/reset
///
/// Return the card to the `new` tier. Resetting a new card is a no-op.
pub async fn reset(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Card>>> {
    let store = state.review_store();
    scheduler::reset_card(&store, auth.user_id, id).await?;

    tracing::info!(card_id = id, user_id = auth.user_id, "Card reset");

    let card = load_owned_card(&state, auth.user_id, id).await?;
    Ok(Json(DataResponse { data: card }))
}

// ---------------------------------------------------------------------------
// Card-tag associations
// ---------------------------------------------------------------------------

/// GET /api/v1/cards/{id}/tags
pub async fn list_tags(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<TagInfo>>>> {
    load_owned_card(&state, auth.user_id, id).await?;
    let tags = TagRepo::tags_for_card(&state.pool, id).await?;
    Ok(Json(DataResponse { data: tags }))
}

/// POST /api/v1/cards/{id}/tags
///
/// Attach one of the caller's existing tags. Attaching twice is a no-op.
pub async fn attach_tag(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AttachTagRequest>,
) -> AppResult<Json<DataResponse<Vec<TagInfo>>>> {
    load_owned_card(&state, auth.user_id, id).await?;
    if !TagRepo::exists_for_user(&state.pool, auth.user_id, input.tag_id).await? {
        return Err(AppError::not_found("Tag", input.tag_id));
    }

    let attached = TagRepo::attach(&state.pool, id, input.tag_id).await?;
    tracing::info!(
        card_id = id,
        tag_id = input.tag_id,
        user_id = auth.user_id,
        attached,
        "Tag attached to card",
    );

    let tags = TagRepo::tags_for_card(&state.pool, id).await?;
    Ok(Json(DataResponse { data: tags }))
}

/// DELETE /api/v1/cards/{id}/tags/{tag_id}
pub async fn detach_tag(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((id, tag_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    load_owned_card(&state, auth.user_id, id).await?;

    if TagRepo::detach(&state.pool, id, tag_id).await? {
        tracing::info!(card_id = id, tag_id, user_id = auth.user_id, "Tag detached from card");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Tag", tag_id))
    }
}
