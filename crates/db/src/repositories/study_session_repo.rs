//! Repository for the `study_sessions` table and the progress reports built on it.

use flashdeck_core::types::DbId;
use sqlx::PgPool;

use crate::models::study_session::{
    CreateStudySession, DeckStats, HistoryParams, OverallStats, SessionHistoryEntry,
    StudySession, TagStats,
};
use crate::repositories::{clamp_limit, clamp_offset};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, deck_id, tag_id, correct_count, incorrect_count, \
                       session_date, created_at, updated_at";

/// Records study sessions and aggregates them.
pub struct StudySessionRepo;

impl StudySessionRepo {
    /// Log a finished study session for `user_id`.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateStudySession,
    ) -> Result<StudySession, sqlx::Error> {
        let query = format!(
            "INSERT INTO study_sessions (user_id, deck_id, tag_id, correct_count, incorrect_count)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StudySession>(&query)
            .bind(user_id)
            .bind(input.deck_id)
            .bind(input.tag_id)
            .bind(input.correct_count)
            .bind(input.incorrect_count)
            .fetch_one(pool)
            .await
    }

    /// The user's sessions, newest first, optionally filtered by deck or tag.
    pub async fn history(
        pool: &PgPool,
        user_id: DbId,
        params: &HistoryParams,
    ) -> Result<Vec<SessionHistoryEntry>, sqlx::Error> {
        sqlx::query_as::<_, SessionHistoryEntry>(
            "SELECT ss.id, ss.correct_count, ss.incorrect_count, ss.session_date,
                    ss.deck_id, d.name AS deck_name, ss.tag_id, t.name AS tag_name
             FROM study_sessions ss
             LEFT JOIN decks d ON d.id = ss.deck_id
             LEFT JOIN tags t ON t.id = ss.tag_id
             WHERE ss.user_id = $1
               AND ($2::BIGINT IS NULL OR ss.deck_id = $2)
               AND ($3::BIGINT IS NULL OR ss.tag_id = $3)
             ORDER BY ss.session_date DESC, ss.id DESC
             LIMIT $4 OFFSET $5",
        )
        .bind(user_id)
        .bind(params.deck_id)
        .bind(params.tag_id)
        .bind(clamp_limit(params.limit))
        .bind(clamp_offset(params.offset))
        .fetch_all(pool)
        .await
    }

    /// Totals across all of the user's sessions.
    pub async fn overall_stats(pool: &PgPool, user_id: DbId) -> Result<OverallStats, sqlx::Error> {
        sqlx::query_as::<_, OverallStats>(
            "SELECT COALESCE(SUM(correct_count), 0)::BIGINT AS total_correct,
                    COALESCE(SUM(incorrect_count), 0)::BIGINT AS total_incorrect,
                    COUNT(*) AS total_sessions,
                    MIN(session_date) AS first_session_date,
                    MAX(session_date) AS last_session_date
             FROM study_sessions
             WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// Per-deck totals for every deck the user owns, zeros when never studied.
    pub async fn stats_by_deck(pool: &PgPool, user_id: DbId) -> Result<Vec<DeckStats>, sqlx::Error> {
        sqlx::query_as::<_, DeckStats>(
            "SELECT d.id AS deck_id, d.name AS deck_name,
                    COUNT(ss.id) AS total_sessions,
                    COALESCE(SUM(ss.correct_count), 0)::BIGINT AS total_correct,
                    COALESCE(SUM(ss.incorrect_count), 0)::BIGINT AS total_incorrect
             FROM decks d
             LEFT JOIN study_sessions ss ON ss.deck_id = d.id AND ss.user_id = d.user_id
             WHERE d.user_id = $1
             GROUP BY d.id, d.name
             ORDER BY d.name, d.id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Per-tag totals for every tag the user owns, zeros when never studied.
    pub async fn stats_by_tag(pool: &PgPool, user_id: DbId) -> Result<Vec<TagStats>, sqlx::Error> {
        sqlx::query_as::<_, TagStats>(
            "SELECT t.id AS tag_id, t.name AS tag_name,
                    COUNT(ss.id) AS total_sessions,
                    COALESCE(SUM(ss.correct_count), 0)::BIGINT AS total_correct,
                    COALESCE(SUM(ss.incorrect_count), 0)::BIGINT AS total_incorrect
             FROM tags t
             LEFT JOIN study_sessions ss ON ss.tag_id = t.id AND ss.user_id = t.user_id
             WHERE t.user_id = $1
             GROUP BY t.id, t.name
             ORDER BY t.name, t.id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
