//! Review state machine for the fixed-bucket scheduler.
//!
//! Every card sits in one of five difficulty tiers. Submitting a rating moves
//! the card into the tier given by the rating table and pushes its next review
//! out by a fixed interval. There are no ease factors and no interval growth:
//! the outcome depends only on `(rating, now)`.

use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Difficulty tiers
// ---------------------------------------------------------------------------

/// Difficulty tier of a card.
///
/// Variants are declared in study order so the derived `Ord` agrees with
/// [`Difficulty::rank`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Never reviewed (or reset).
    #[default]
    New,
    Again,
    Hard,
    Medium,
    Easy,
}

/// All tiers in rank order.
pub const ALL_DIFFICULTIES: [Difficulty; 5] = [
    Difficulty::New,
    Difficulty::Again,
    Difficulty::Hard,
    Difficulty::Medium,
    Difficulty::Easy,
];

impl Difficulty {
    /// Study-order rank, 1 (`new`) through 5 (`easy`). Lower ranks are shown first.
    pub fn rank(self) -> u8 {
        match self {
            Difficulty::New => 1,
            Difficulty::Again => 2,
            Difficulty::Hard => 3,
            Difficulty::Medium => 4,
            Difficulty::Easy => 5,
        }
    }

    /// The persisted / wire name of the tier.
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::New => "new",
            Difficulty::Again => "again",
            Difficulty::Hard => "hard",
            Difficulty::Medium => "medium",
            Difficulty::Easy => "easy",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_DIFFICULTIES
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid difficulty '{s}'. Must be one of: new, again, hard, medium, easy"
                ))
            })
    }
}

impl TryFrom<String> for Difficulty {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ---------------------------------------------------------------------------
// Ratings
// ---------------------------------------------------------------------------

/// Lowest accepted rating (complete blackout).
pub const MIN_RATING: i64 = 1;

/// Highest accepted rating (perfect recall).
pub const MAX_RATING: i64 = 5;

/// A self-assessed recall rating in `1..=5`.
///
/// Only constructible through [`TryFrom<i64>`], so holding a `Rating` means
/// the value has already been validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Rating {
    Blackout = 1,
    Hard = 2,
    Good = 3,
    Easy = 4,
    Perfect = 5,
}

impl Rating {
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Tier the card moves into and the delay before it is due again.
    pub fn schedule(self) -> (Difficulty, Duration) {
        match self {
            Rating::Blackout => (Difficulty::Again, Duration::minutes(10)),
            Rating::Hard => (Difficulty::Hard, Duration::days(1)),
            Rating::Good => (Difficulty::Medium, Duration::days(3)),
            Rating::Easy => (Difficulty::Easy, Duration::days(7)),
            Rating::Perfect => (Difficulty::Easy, Duration::days(14)),
        }
    }
}

impl TryFrom<i64> for Rating {
    type Error = CoreError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Rating::Blackout),
            2 => Ok(Rating::Hard),
            3 => Ok(Rating::Good),
            4 => Ok(Rating::Easy),
            5 => Ok(Rating::Perfect),
            _ => Err(CoreError::Validation(format!(
                "Rating must be an integer from {MIN_RATING} to {MAX_RATING}, got {value}"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Review state
// ---------------------------------------------------------------------------

/// The three scheduling fields of a card. They are always written together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReviewState {
    pub difficulty: Difficulty,
    pub last_studied: Option<Timestamp>,
    pub next_review: Option<Timestamp>,
}

impl Default for ReviewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ReviewState {
    /// State of a freshly created (or reset) card.
    pub fn new() -> Self {
        Self {
            difficulty: Difficulty::New,
            last_studied: None,
            next_review: None,
        }
    }

    /// Return the card to the `new` tier and clear both timestamps.
    ///
    /// Resetting a card that is already new leaves it unchanged.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Whether a card in this state should be studied at `now`.
    ///
    /// `new` cards are always due, whatever their timestamps say.
    pub fn is_due(&self, now: Timestamp) -> bool {
        is_due(self.difficulty, self.next_review, now)
    }

    /// Checks the card invariant: `new` cards carry no `next_review`, every
    /// other tier has both timestamps with `next_review > last_studied`.
    pub fn is_consistent(&self) -> bool {
        match (self.difficulty, self.last_studied, self.next_review) {
            (Difficulty::New, _, None) => true,
            (Difficulty::New, _, Some(_)) => false,
            (_, Some(studied), Some(next)) => next > studied,
            _ => false,
        }
    }
}

/// Due predicate shared by the state machine and the selector.
pub fn is_due(difficulty: Difficulty, next_review: Option<Timestamp>, now: Timestamp) -> bool {
    difficulty == Difficulty::New || next_review.map_or(true, |next| next <= now)
}

/// Compute the state a card moves to after being rated at `now`.
///
/// The prior state does not influence the result.
pub fn advance(rating: Rating, now: Timestamp) -> ReviewState {
    let (difficulty, interval) = rating.schedule();
    ReviewState {
        difficulty,
        last_studied: Some(now),
        next_review: Some(now + interval),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::TimeZone;

    use super::*;

    fn t0() -> Timestamp {
        chrono::Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn rating(v: i64) -> Rating {
        Rating::try_from(v).unwrap()
    }

    // -----------------------------------------------------------------------
    // Transition table
    // -----------------------------------------------------------------------

    #[test]
    fn rating_1_moves_to_again_in_ten_minutes() {
        let state = advance(rating(1), t0());
        assert_eq!(state.difficulty, Difficulty::Again);
        assert_eq!(state.next_review, Some(t0() + Duration::minutes(10)));
    }

    #[test]
    fn rating_2_moves_to_hard_in_one_day() {
        let state = advance(rating(2), t0());
        assert_eq!(state.difficulty, Difficulty::Hard);
        assert_eq!(state.next_review, Some(t0() + Duration::days(1)));
    }

    #[test]
    fn rating_3_moves_to_medium_in_three_days() {
        let state = advance(rating(3), t0());
        assert_eq!(state.difficulty, Difficulty::Medium);
        assert_eq!(state.next_review, Some(t0() + Duration::days(3)));
        assert_eq!(state.last_studied, Some(t0()));
    }

    #[test]
    fn rating_4_moves_to_easy_in_seven_days() {
        let state = advance(rating(4), t0());
        assert_eq!(state.difficulty, Difficulty::Easy);
        assert_eq!(state.next_review, Some(t0() + Duration::days(7)));
    }

    #[test]
    fn rating_5_moves_to_easy_in_fourteen_days() {
        let state = advance(rating(5), t0());
        assert_eq!(state.difficulty, Difficulty::Easy);
        assert_eq!(state.next_review, Some(t0() + Duration::days(14)));
    }

    #[test]
    fn every_advanced_state_is_consistent() {
        for r in MIN_RATING..=MAX_RATING {
            let state = advance(rating(r), t0());
            assert!(state.is_consistent(), "rating {r} produced {state:?}");
            assert_eq!(state.last_studied, Some(t0()));
        }
    }

    #[test]
    fn out_of_range_ratings_are_rejected() {
        for bad in [0, 6, -1, 100] {
            assert_matches!(Rating::try_from(bad), Err(CoreError::Validation(_)));
        }
    }

    #[test]
    fn each_accepted_rating_keeps_its_value() {
        for r in MIN_RATING..=MAX_RATING {
            assert_eq!(i64::from(rating(r).value()), r);
        }
        assert_eq!(rating(3), Rating::Good);
    }

    // -----------------------------------------------------------------------
    // New card and reset
    // -----------------------------------------------------------------------

    #[test]
    fn new_state_satisfies_invariant() {
        let state = ReviewState::new();
        assert_eq!(state.difficulty, Difficulty::New);
        assert_eq!(state.next_review, None);
        assert_eq!(state.last_studied, None);
        assert!(state.is_consistent());
    }

    #[test]
    fn reset_clears_reviewed_card() {
        let mut state = advance(rating(2), t0());
        state.reset();
        assert_eq!(state, ReviewState::new());
    }

    #[test]
    fn reset_is_idempotent() {
        let mut state = ReviewState::new();
        state.reset();
        state.reset();
        assert_eq!(state, ReviewState::new());
    }

    // -----------------------------------------------------------------------
    // Due predicate
    // -----------------------------------------------------------------------

    #[test]
    fn new_card_is_due_even_with_future_timestamp() {
        let state = ReviewState {
            difficulty: Difficulty::New,
            last_studied: None,
            next_review: Some(t0() + Duration::days(30)),
        };
        assert!(state.is_due(t0()));
        assert!(!state.is_consistent());
    }

    #[test]
    fn reviewed_card_is_due_at_exact_next_review() {
        let state = advance(rating(1), t0());
        assert!(!state.is_due(t0()));
        assert!(state.is_due(t0() + Duration::minutes(10)));
    }

    #[test]
    fn missing_next_review_counts_as_due() {
        assert!(is_due(Difficulty::Easy, None, t0()));
    }

    // -----------------------------------------------------------------------
    // Names and ranks
    // -----------------------------------------------------------------------

    #[test]
    fn ranks_follow_study_order() {
        let ranks: Vec<u8> = ALL_DIFFICULTIES.iter().map(|d| d.rank()).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
        assert!(Difficulty::New < Difficulty::Easy);
    }

    #[test]
    fn difficulty_names_parse_back() {
        for d in ALL_DIFFICULTIES {
            assert_eq!(d.as_str().parse::<Difficulty>().unwrap(), d);
        }
        assert_matches!("legendary".parse::<Difficulty>(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn difficulty_serializes_lowercase() {
        let json = serde_json::to_string(&Difficulty::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
    }
}
