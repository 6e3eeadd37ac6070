//! Tag and card-tag models and DTOs.

use flashdeck_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `tags` table. Tags are private to their owner.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Tag {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Lightweight tag info embedded in card responses.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct TagInfo {
    pub id: DbId,
    pub name: String,
}

/// Tag info keyed by the card it is attached to, for batch lookups.
#[derive(Debug, Clone, FromRow)]
pub struct CardTagInfo {
    pub card_id: DbId,
    pub id: DbId,
    pub name: String,
}

/// DTO for creating a tag.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTag {
    pub name: String,
}

/// DTO for attaching an existing tag to a card.
#[derive(Debug, Clone, Deserialize)]
pub struct AttachTagRequest {
    pub tag_id: DbId,
}
