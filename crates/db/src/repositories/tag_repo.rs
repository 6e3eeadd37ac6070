//! Repository for the `tags` and `card_tags` tables.

use flashdeck_core::types::DbId;
use sqlx::PgPool;

use crate::models::tag::{CardTagInfo, Tag, TagInfo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, name, created_at, updated_at";

/// Provides tag CRUD and card-tag association operations.
pub struct TagRepo;

impl TagRepo {
    /// Create a tag for `user_id`.
    ///
    /// A duplicate name fails with the `uq_tags_user_name` constraint.
    pub async fn create(pool: &PgPool, user_id: DbId, name: &str) -> Result<Tag, sqlx::Error> {
        let query = format!(
            "INSERT INTO tags (user_id, name) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tag>(&query)
            .bind(user_id)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    /// List all of the user's tags ordered by name.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Tag>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tags WHERE user_id = $1 ORDER BY name, id");
        sqlx::query_as::<_, Tag>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Find one of the user's tags.
    pub async fn find_for_user(
        pool: &PgPool,
        user_id: DbId,
        tag_id: DbId,
    ) -> Result<Option<Tag>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tags WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Tag>(&query)
            .bind(tag_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Whether `tag_id` exists and belongs to `user_id`.
    pub async fn exists_for_user(
        pool: &PgPool,
        user_id: DbId,
        tag_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM tags WHERE id = $1 AND user_id = $2)")
                .bind(tag_id)
                .bind(user_id)
                .fetch_one(pool)
                .await?;
        Ok(exists)
    }

    /// Delete a tag and, by cascade, its card associations.
    pub async fn delete(pool: &PgPool, user_id: DbId, tag_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tags WHERE id = $1 AND user_id = $2")
            .bind(tag_id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Tags attached to one card, ordered by name.
    pub async fn tags_for_card(pool: &PgPool, card_id: DbId) -> Result<Vec<TagInfo>, sqlx::Error> {
        sqlx::query_as::<_, TagInfo>(
            "SELECT t.id, t.name
             FROM card_tags ct
             JOIN tags t ON t.id = ct.tag_id
             WHERE ct.card_id = $1
             ORDER BY t.name, t.id",
        )
        .bind(card_id)
        .fetch_all(pool)
        .await
    }

    /// Tags for many cards at once, ordered by card then tag name.
    pub async fn tags_for_cards(
        pool: &PgPool,
        card_ids: &[DbId],
    ) -> Result<Vec<CardTagInfo>, sqlx::Error> {
        if card_ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, CardTagInfo>(
            "SELECT ct.card_id, t.id, t.name
             FROM card_tags ct
             JOIN tags t ON t.id = ct.tag_id
             WHERE ct.card_id = ANY($1)
             ORDER BY ct.card_id, t.name, t.id",
        )
        .bind(card_ids)
        .fetch_all(pool)
        .await
    }

    /// Link a tag to a card. Linking twice is a no-op.
    ///
    /// Returns `true` if a new association was created.
    pub async fn attach(pool: &PgPool, card_id: DbId, tag_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO card_tags (card_id, tag_id) VALUES ($1, $2)
             ON CONFLICT (card_id, tag_id) DO NOTHING",
        )
        .bind(card_id)
        .bind(tag_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Unlink a tag from a card. Returns `true` if an association was removed.
    pub async fn detach(pool: &PgPool, card_id: DbId, tag_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM card_tags WHERE card_id = $1 AND tag_id = $2")
            .bind(card_id)
            .bind(tag_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
