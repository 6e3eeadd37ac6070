//! Repository for the `cards` table and its review fields.
//!
//! Ownership is enforced through the parent deck: every user-scoped query
//! joins (or sub-selects) `decks.user_id`.

use flashdeck_core::review::{Difficulty, ReviewState};
use flashdeck_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::card::Card;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, deck_id, front, back, difficulty, last_studied, next_review, \
                       created_at, updated_at";

/// Same columns, qualified for queries that join `cards c`.
const C_COLUMNS: &str = "c.id, c.deck_id, c.front, c.back, c.difficulty, c.last_studied, \
                         c.next_review, c.created_at, c.updated_at";

/// Restricts a `cards` row to decks owned by the bound user.
const OWNED_BY: &str = "deck_id IN (SELECT id FROM decks WHERE user_id = $2)";

/// Provides CRUD and review-state operations for cards.
pub struct CardRepo;

impl CardRepo {
    /// Create a card in `deck_id` and attach the given (already normalized)
    /// tag names, creating missing tags for `user_id`.
    ///
    /// Runs in a single transaction. The card always starts in the `new` tier.
    pub async fn create_with_tags(
        pool: &PgPool,
        user_id: DbId,
        deck_id: DbId,
        front: &str,
        back: &str,
        tag_names: &[String],
    ) -> Result<Card, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO cards (deck_id, front, back, difficulty)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let card = sqlx::query_as::<_, Card>(&query)
            .bind(deck_id)
            .bind(front)
            .bind(back)
            .bind(Difficulty::New.as_str())
            .fetch_one(&mut *tx)
            .await?;

        attach_tag_names(&mut tx, user_id, card.id, tag_names).await?;

        tx.commit().await?;
        Ok(card)
    }

    /// Find a card owned (through its deck) by `user_id`.
    pub async fn find_for_user(
        pool: &PgPool,
        user_id: DbId,
        card_id: DbId,
    ) -> Result<Option<Card>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cards WHERE id = $1 AND {OWNED_BY}");
        sqlx::query_as::<_, Card>(&query)
            .bind(card_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List every card in one of the user's decks, oldest first.
    pub async fn list_in_deck_for_user(
        pool: &PgPool,
        user_id: DbId,
        deck_id: DbId,
    ) -> Result<Vec<Card>, sqlx::Error> {
        let query = format!(
            "SELECT {C_COLUMNS}
             FROM cards c
             JOIN decks d ON d.id = c.deck_id
             WHERE c.deck_id = $1 AND d.user_id = $2
             ORDER BY c.id"
        );
        sqlx::query_as::<_, Card>(&query)
            .bind(deck_id)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// List the user's cards carrying `tag_id`, across all of their decks.
    pub async fn list_with_tag_for_user(
        pool: &PgPool,
        user_id: DbId,
        tag_id: DbId,
    ) -> Result<Vec<Card>, sqlx::Error> {
        let query = format!(
            "SELECT {C_COLUMNS}
             FROM cards c
             JOIN card_tags ct ON ct.card_id = c.id
             JOIN decks d ON d.id = c.deck_id
             WHERE ct.tag_id = $1 AND d.user_id = $2
             ORDER BY c.id"
        );
        sqlx::query_as::<_, Card>(&query)
            .bind(tag_id)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Patch a card's text and optionally replace its tag set.
    ///
    /// Review fields are left alone. Returns `None` if the card does not
    /// exist for this user.
    pub async fn update_content(
        pool: &PgPool,
        user_id: DbId,
        card_id: DbId,
        front: Option<&str>,
        back: Option<&str>,
        tag_names: Option<&[String]>,
    ) -> Result<Option<Card>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE cards SET
                front = COALESCE($3, front),
                back = COALESCE($4, back)
             WHERE id = $1 AND {OWNED_BY}
             RETURNING {COLUMNS}"
        );
        let card = sqlx::query_as::<_, Card>(&query)
            .bind(card_id)
            .bind(user_id)
            .bind(front)
            .bind(back)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(card) = card else {
            return Ok(None);
        };

        if let Some(names) = tag_names {
            sqlx::query("DELETE FROM card_tags WHERE card_id = $1")
                .bind(card.id)
                .execute(&mut *tx)
                .await?;
            attach_tag_names(&mut tx, user_id, card.id, names).await?;
        }

        tx.commit().await?;
        Ok(Some(card))
    }

    /// Delete a card. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, user_id: DbId, card_id: DbId) -> Result<bool, sqlx::Error> {
        let query = format!("DELETE FROM cards WHERE id = $1 AND {OWNED_BY}");
        let result = sqlx::query(&query)
            .bind(card_id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Write `difficulty`, `last_studied` and `next_review` in one statement.
    ///
    /// Returns `false` if the card does not exist for this user.
    pub async fn update_review_state(
        pool: &PgPool,
        user_id: DbId,
        card_id: DbId,
        state: &ReviewState,
    ) -> Result<bool, sqlx::Error> {
        let query = format!(
            "UPDATE cards SET
                difficulty = $3,
                last_studied = $4,
                next_review = $5
             WHERE id = $1 AND {OWNED_BY}"
        );
        let result = sqlx::query(&query)
            .bind(card_id)
            .bind(user_id)
            .bind(state.difficulty.as_str())
            .bind(state.last_studied)
            .bind(state.next_review)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Return one card to the `new` tier with both timestamps cleared.
    pub async fn reset_review_state(
        pool: &PgPool,
        user_id: DbId,
        card_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        Self::update_review_state(pool, user_id, card_id, &ReviewState::new()).await
    }

    /// Reset every card in one of the user's decks. Returns the row count.
    pub async fn reset_all_in_deck(
        pool: &PgPool,
        user_id: DbId,
        deck_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE cards SET difficulty = $3, last_studied = NULL, next_review = NULL
             WHERE deck_id = $1
               AND deck_id IN (SELECT id FROM decks WHERE user_id = $2)",
        )
        .bind(deck_id)
        .bind(user_id)
        .bind(Difficulty::New.as_str())
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Reset every one of the user's cards carrying `tag_id`. Returns the row count.
    pub async fn reset_all_with_tag(
        pool: &PgPool,
        user_id: DbId,
        tag_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE cards SET difficulty = $3, last_studied = NULL, next_review = NULL
             WHERE id IN (SELECT card_id FROM card_tags WHERE tag_id = $1)
               AND deck_id IN (SELECT id FROM decks WHERE user_id = $2)",
        )
        .bind(tag_id)
        .bind(user_id)
        .bind(Difficulty::New.as_str())
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}

/// Upsert each tag name for `user_id` and link it to `card_id`.
async fn attach_tag_names(
    tx: &mut Transaction<'_, Postgres>,
    user_id: DbId,
    card_id: DbId,
    tag_names: &[String],
) -> Result<(), sqlx::Error> {
    for name in tag_names {
        // The no-op update makes RETURNING yield the existing row on conflict.
        let (tag_id,): (DbId,) = sqlx::query_as(
            "INSERT INTO tags (user_id, name) VALUES ($1, $2)
             ON CONFLICT (user_id, name) DO UPDATE SET name = EXCLUDED.name
             RETURNING id",
        )
        .bind(user_id)
        .bind(name)
        .fetch_one(&mut **tx)
        .await?;

        sqlx::query(
            "INSERT INTO card_tags (card_id, tag_id) VALUES ($1, $2)
             ON CONFLICT (card_id, tag_id) DO NOTHING",
        )
        .bind(card_id)
        .bind(tag_id)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}
