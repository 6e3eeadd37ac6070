//! Deck entity model and DTOs.

use flashdeck_core::types::{DbId, Timestamp};
use flashdeck_core::validation::{MAX_DECK_DESCRIPTION_LENGTH, MAX_DECK_NAME_LENGTH};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `decks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Deck {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A deck with card counts, as returned by the deck listing endpoints.
///
/// `cards_for_review` uses the same due rule as the study endpoints.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DeckSummary {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub total_cards: i64,
    pub cards_for_review: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a deck.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDeck {
    #[validate(length(min = 1, max = MAX_DECK_NAME_LENGTH))]
    pub name: String,
    #[validate(length(max = MAX_DECK_DESCRIPTION_LENGTH))]
    pub description: Option<String>,
}

/// DTO for updating a deck. At least one field must be present.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateDeck {
    #[validate(length(min = 1, max = MAX_DECK_NAME_LENGTH))]
    pub name: Option<String>,
    #[validate(length(max = MAX_DECK_DESCRIPTION_LENGTH))]
    pub description: Option<String>,
}

impl UpdateDeck {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}
