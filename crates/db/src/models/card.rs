//! Card entity model and DTOs.

use flashdeck_core::due::Schedulable;
use flashdeck_core::review::{Difficulty, ReviewState};
use flashdeck_core::types::{DbId, Timestamp};
use flashdeck_core::validation::{MAX_CARD_SIDE_LENGTH, MAX_TAGS_PER_CARD};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::tag::TagInfo;

/// A row from the `cards` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Card {
    pub id: DbId,
    pub deck_id: DbId,
    pub front: String,
    pub back: String,
    #[sqlx(try_from = "String")]
    pub difficulty: Difficulty,
    pub last_studied: Option<Timestamp>,
    pub next_review: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Card {
    /// The three scheduling fields of this card.
    pub fn review_state(&self) -> ReviewState {
        ReviewState {
            difficulty: self.difficulty,
            last_studied: self.last_studied,
            next_review: self.next_review,
        }
    }
}

impl Schedulable for Card {
    fn id(&self) -> DbId {
        self.id
    }

    fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    fn next_review(&self) -> Option<Timestamp> {
        self.next_review
    }
}

/// A card together with the tags attached to it.
#[derive(Debug, Clone, Serialize)]
pub struct CardWithTags {
    #[serde(flatten)]
    pub card: Card,
    pub tags: Vec<TagInfo>,
}

/// DTO for creating a card. Tags are looked up by name and created on first use.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCard {
    #[validate(length(min = 1, max = MAX_CARD_SIDE_LENGTH))]
    pub front: String,
    #[validate(length(min = 1, max = MAX_CARD_SIDE_LENGTH))]
    pub back: String,
    #[serde(default)]
    #[validate(length(max = MAX_TAGS_PER_CARD))]
    pub tags: Vec<String>,
}

/// DTO for updating a card. `tags`, when present, replaces the card's tag set.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCard {
    #[validate(length(min = 1, max = MAX_CARD_SIDE_LENGTH))]
    pub front: Option<String>,
    #[validate(length(min = 1, max = MAX_CARD_SIDE_LENGTH))]
    pub back: Option<String>,
    #[validate(length(max = MAX_TAGS_PER_CARD))]
    pub tags: Option<Vec<String>>,
}
