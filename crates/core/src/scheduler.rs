//! Scheduling operations exposed to the HTTP layer.
//!
//! Each operation takes the owning user, the target, and an explicit `now`.
//! Persistence goes through [`ReviewStore`], which is responsible for
//! ownership filtering and for writing the three review fields atomically.

use async_trait::async_trait;
use serde::Serialize;

use crate::due::{select_due, DueCards, DueScope, Schedulable};
use crate::error::CoreError;
use crate::review::{advance, Difficulty, Rating, ReviewState};
use crate::types::{DbId, Timestamp};

/// Storage collaborator for the scheduler.
///
/// Every method is scoped to `owner_id`: cards, decks and tags belonging to
/// other users behave exactly like missing ones.
#[async_trait]
pub trait ReviewStore: Send + Sync {
    type Card: Schedulable + Send;

    /// All cards in `scope` owned by `owner_id`.
    ///
    /// Returns `CoreError::NotFound` when the deck or tag does not exist or
    /// belongs to someone else.
    async fn find_cards_in_scope(
        &self,
        owner_id: DbId,
        scope: DueScope,
    ) -> Result<Vec<Self::Card>, CoreError>;

    /// Write all three review fields in one statement. `Ok(false)` means the
    /// card was not found for this owner.
    async fn update_card_review_state(
        &self,
        owner_id: DbId,
        card_id: DbId,
        state: &ReviewState,
    ) -> Result<bool, CoreError>;

    /// Return one card to the new state. `Ok(false)` means not found.
    async fn reset_card_review_state(&self, owner_id: DbId, card_id: DbId)
        -> Result<bool, CoreError>;

    /// Return every card in `scope` to the new state, returning how many rows
    /// were updated. Unknown scopes yield `CoreError::NotFound`.
    async fn reset_all_in_scope(&self, owner_id: DbId, scope: DueScope)
        -> Result<u64, CoreError>;
}

/// Result of rating a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RatingOutcome {
    pub card_id: DbId,
    pub difficulty: Difficulty,
    pub last_studied: Timestamp,
    pub next_review: Timestamp,
}

/// Cards due for study in `scope` at `now`, in study order.
pub async fn get_due_cards<S: ReviewStore>(
    store: &S,
    owner_id: DbId,
    scope: DueScope,
    now: Timestamp,
) -> Result<DueCards<S::Card>, CoreError> {
    let candidates = store.find_cards_in_scope(owner_id, scope).await?;
    let candidate_count = candidates.len();
    let due = select_due(candidates, now);

    tracing::debug!(
        owner_id,
        scope = scope.entity(),
        scope_id = scope.id(),
        candidate_count,
        due = due.total,
        "Selected due cards",
    );

    Ok(due)
}

/// Apply a rating to a card.
///
/// The rating is validated before the store is touched, so an invalid rating
/// never changes the card.
pub async fn rate_card<S: ReviewStore>(
    store: &S,
    owner_id: DbId,
    card_id: DbId,
    rating: i64,
    now: Timestamp,
) -> Result<RatingOutcome, CoreError> {
    let rating = Rating::try_from(rating)?;
    let state = advance(rating, now);

    if !store
        .update_card_review_state(owner_id, card_id, &state)
        .await?
    {
        return Err(CoreError::NotFound {
            entity: "Card",
            id: card_id,
        });
    }

    // advance() always sets both timestamps.
    let (Some(last_studied), Some(next_review)) = (state.last_studied, state.next_review) else {
        return Err(CoreError::Internal(format!(
            "Rated card {card_id} is missing review timestamps"
        )));
    };

    Ok(RatingOutcome {
        card_id,
        difficulty: state.difficulty,
        last_studied,
        next_review,
    })
}

/// Return a card to the new state. Resetting a new card is not an error.
pub async fn reset_card<S: ReviewStore>(
    store: &S,
    owner_id: DbId,
    card_id: DbId,
) -> Result<(), CoreError> {
    if store.reset_card_review_state(owner_id, card_id).await? {
        Ok(())
    } else {
        Err(CoreError::NotFound {
            entity: "Card",
            id: card_id,
        })
    }
}

/// Return every card in `scope` to the new state.
pub async fn reset_scope<S: ReviewStore>(
    store: &S,
    owner_id: DbId,
    scope: DueScope,
) -> Result<u64, CoreError> {
    store.reset_all_in_scope(owner_id, scope).await
}
