//! Repository for the `decks` table.

use flashdeck_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::deck::{CreateDeck, Deck, DeckSummary, UpdateDeck};

/// Column list for plain deck rows.
const COLUMNS: &str = "id, user_id, name, description, created_at, updated_at";

/// Deck columns plus card counts. `$1` is the owner, `$2` is `now`.
///
/// The `cards_for_review` filter mirrors `flashdeck_core::review::is_due`.
const SUMMARY_SELECT: &str = "\
    SELECT d.id, d.user_id, d.name, d.description, \
           COUNT(c.id) AS total_cards, \
           COUNT(c.id) FILTER (WHERE c.id IS NOT NULL AND ( \
               c.difficulty = 'new' OR c.next_review IS NULL OR c.next_review <= $2 \
           )) AS cards_for_review, \
           d.created_at, d.updated_at \
    FROM decks d \
    LEFT JOIN cards c ON c.deck_id = d.id \
    WHERE d.user_id = $1";

/// Provides CRUD operations for decks.
pub struct DeckRepo;

impl DeckRepo {
    /// Insert a new deck for `user_id`.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateDeck,
    ) -> Result<Deck, sqlx::Error> {
        let query = format!(
            "INSERT INTO decks (user_id, name, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Deck>(&query)
            .bind(user_id)
            .bind(input.name.trim())
            .bind(input.description.as_deref())
            .fetch_one(pool)
            .await
    }

    /// List the user's decks by name, with card counts as of `now`.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        now: Timestamp,
    ) -> Result<Vec<DeckSummary>, sqlx::Error> {
        let query = format!("{SUMMARY_SELECT} GROUP BY d.id ORDER BY d.name ASC, d.id ASC");
        sqlx::query_as::<_, DeckSummary>(&query)
            .bind(user_id)
            .bind(now)
            .fetch_all(pool)
            .await
    }

    /// Find one of the user's decks, with card counts as of `now`.
    pub async fn find_summary_for_user(
        pool: &PgPool,
        user_id: DbId,
        deck_id: DbId,
        now: Timestamp,
    ) -> Result<Option<DeckSummary>, sqlx::Error> {
        let query = format!("{SUMMARY_SELECT} AND d.id = $3 GROUP BY d.id");
        sqlx::query_as::<_, DeckSummary>(&query)
            .bind(user_id)
            .bind(now)
            .bind(deck_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a deck owned by `user_id`.
    pub async fn find_for_user(
        pool: &PgPool,
        user_id: DbId,
        deck_id: DbId,
    ) -> Result<Option<Deck>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM decks WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Deck>(&query)
            .bind(deck_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Whether `deck_id` exists and belongs to `user_id`.
    pub async fn exists_for_user(
        pool: &PgPool,
        user_id: DbId,
        deck_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM decks WHERE id = $1 AND user_id = $2)")
                .bind(deck_id)
                .bind(user_id)
                .fetch_one(pool)
                .await?;
        Ok(exists)
    }

    /// Patch a deck's name and/or description.
    ///
    /// Returns `None` if the deck does not exist for this user.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        deck_id: DbId,
        input: &UpdateDeck,
    ) -> Result<Option<Deck>, sqlx::Error> {
        let query = format!(
            "UPDATE decks SET
                name = COALESCE($3, name),
                description = COALESCE($4, description)
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Deck>(&query)
            .bind(deck_id)
            .bind(user_id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(input.description.as_deref())
            .fetch_optional(pool)
            .await
    }

    /// Delete a deck and, by cascade, its cards.
    ///
    /// Returns `true` if a deck was deleted.
    pub async fn delete(pool: &PgPool, user_id: DbId, deck_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM decks WHERE id = $1 AND user_id = $2")
            .bind(deck_id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
