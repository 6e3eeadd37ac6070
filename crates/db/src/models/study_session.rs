//! Study session log and reporting models.

use flashdeck_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `study_sessions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StudySession {
    pub id: DbId,
    pub user_id: DbId,
    pub deck_id: Option<DbId>,
    pub tag_id: Option<DbId>,
    pub correct_count: i32,
    pub incorrect_count: i32,
    pub session_date: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a finished session. Either `deck_id` or `tag_id` is required.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateStudySession {
    pub deck_id: Option<DbId>,
    pub tag_id: Option<DbId>,
    #[validate(range(min = 0))]
    pub correct_count: i32,
    #[validate(range(min = 0))]
    pub incorrect_count: i32,
}

/// One entry of the session history, with deck/tag names resolved.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SessionHistoryEntry {
    pub id: DbId,
    pub correct_count: i32,
    pub incorrect_count: i32,
    pub session_date: Timestamp,
    pub deck_id: Option<DbId>,
    pub deck_name: Option<String>,
    pub tag_id: Option<DbId>,
    pub tag_name: Option<String>,
}

/// Query parameters for `GET /reports/history`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryParams {
    pub deck_id: Option<DbId>,
    pub tag_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Totals across all of a user's sessions.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OverallStats {
    pub total_correct: i64,
    pub total_incorrect: i64,
    pub total_sessions: i64,
    pub first_session_date: Option<Timestamp>,
    pub last_session_date: Option<Timestamp>,
}

/// Per-deck session totals. Decks without sessions report zeros.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DeckStats {
    pub deck_id: DbId,
    pub deck_name: String,
    pub total_sessions: i64,
    pub total_correct: i64,
    pub total_incorrect: i64,
}

/// Per-tag session totals. Tags without sessions report zeros.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TagStats {
    pub tag_id: DbId,
    pub tag_name: String,
    pub total_sessions: i64,
    pub total_correct: i64,
    pub total_incorrect: i64,
}
