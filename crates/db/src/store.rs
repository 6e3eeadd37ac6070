//! PostgreSQL implementation of the scheduler's [`ReviewStore`].

use async_trait::async_trait;
use flashdeck_core::due::DueScope;
use flashdeck_core::error::CoreError;
use flashdeck_core::review::ReviewState;
use flashdeck_core::scheduler::ReviewStore;
use flashdeck_core::types::DbId;
use sqlx::PgPool;

use crate::models::card::Card;
use crate::repositories::{CardRepo, DeckRepo, TagRepo};

/// Review storage backed by the card repository.
#[derive(Debug, Clone)]
pub struct PgReviewStore {
    pool: PgPool,
}

impl PgReviewStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fail with `NotFound` unless the deck or tag belongs to `owner_id`.
    async fn require_scope(&self, owner_id: DbId, scope: DueScope) -> Result<(), CoreError> {
        let exists = match scope {
            DueScope::Deck(id) => DeckRepo::exists_for_user(&self.pool, owner_id, id).await,
            DueScope::Tag(id) => TagRepo::exists_for_user(&self.pool, owner_id, id).await,
        }
        .map_err(storage)?;

        if exists {
            Ok(())
        } else {
            Err(CoreError::NotFound {
                entity: scope.entity(),
                id: scope.id(),
            })
        }
    }
}

/// Wrap a driver error so it can cross the core boundary.
fn storage(err: sqlx::Error) -> CoreError {
    CoreError::Storage(err.to_string())
}

#[async_trait]
impl ReviewStore for PgReviewStore {
    type Card = Card;

    async fn find_cards_in_scope(
        &self,
        owner_id: DbId,
        scope: DueScope,
    ) -> Result<Vec<Card>, CoreError> {
        self.require_scope(owner_id, scope).await?;
        match scope {
            DueScope::Deck(id) => CardRepo::list_in_deck_for_user(&self.pool, owner_id, id).await,
            DueScope::Tag(id) => CardRepo::list_with_tag_for_user(&self.pool, owner_id, id).await,
        }
        .map_err(storage)
    }

    async fn update_card_review_state(
        &self,
        owner_id: DbId,
        card_id: DbId,
        state: &ReviewState,
    ) -> Result<bool, CoreError> {
        CardRepo::update_review_state(&self.pool, owner_id, card_id, state)
            .await
            .map_err(storage)
    }

    async fn reset_card_review_state(
        &self,
        owner_id: DbId,
        card_id: DbId,
    ) -> Result<bool, CoreError> {
        CardRepo::reset_review_state(&self.pool, owner_id, card_id)
            .await
            .map_err(storage)
    }

    async fn reset_all_in_scope(&self, owner_id: DbId, scope: DueScope) -> Result<u64, CoreError> {
        self.require_scope(owner_id, scope).await?;
        match scope {
            DueScope::Deck(id) => CardRepo::reset_all_in_deck(&self.pool, owner_id, id).await,
            DueScope::Tag(id) => CardRepo::reset_all_with_tag(&self.pool, owner_id, id).await,
        }
        .map_err(storage)
    }
}
