//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Every lookup of user-owned
//! data takes the owner's id so that foreign rows behave like missing ones.

pub mod card_repo;
pub mod deck_repo;
pub mod study_session_repo;
pub mod tag_repo;
pub mod user_repo;

pub use card_repo::CardRepo;
pub use deck_repo::DeckRepo;
pub use study_session_repo::StudySessionRepo;
pub use tag_repo::TagRepo;
pub use user_repo::UserRepo;

/// Default page size for paginated listings.
pub(crate) const DEFAULT_LIMIT: i64 = 50;

/// Maximum page size for paginated listings.
pub(crate) const MAX_LIMIT: i64 = 500;

/// Clamp an optional client-supplied limit into `1..=MAX_LIMIT`.
pub(crate) fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

/// Clamp an optional client-supplied offset to be non-negative.
pub(crate) fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}
