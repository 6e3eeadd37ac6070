//! Due-set selection: which cards to study now, and in what order.

use serde::{Deserialize, Serialize};

use crate::review::{self, Difficulty};
use crate::types::{DbId, Timestamp};

/// The candidate set a study session draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum DueScope {
    /// All cards in one deck.
    Deck(DbId),
    /// All cards carrying one tag, across the owner's decks.
    Tag(DbId),
}

impl DueScope {
    /// Entity name used when the scope cannot be resolved.
    pub fn entity(self) -> &'static str {
        match self {
            DueScope::Deck(_) => "Deck",
            DueScope::Tag(_) => "Tag",
        }
    }

    pub fn id(self) -> DbId {
        match self {
            DueScope::Deck(id) | DueScope::Tag(id) => id,
        }
    }
}

/// Read access to the fields the selector needs from a card.
pub trait Schedulable {
    fn id(&self) -> DbId;
    fn difficulty(&self) -> Difficulty;
    fn next_review(&self) -> Option<Timestamp>;
}

/// Ordered due cards plus their count.
#[derive(Debug, Clone, Serialize)]
pub struct DueCards<C> {
    pub items: Vec<C>,
    pub total: usize,
}

/// Sort key: tier rank, then `next_review` with nulls earliest, then id.
fn study_order_key<C: Schedulable>(card: &C) -> (u8, Timestamp, DbId) {
    (
        card.difficulty().rank(),
        card.next_review().unwrap_or(Timestamp::MIN_UTC),
        card.id(),
    )
}

/// Keep the cards due at `now` and put them in study order.
///
/// The ordering is total for cards with distinct ids, so the same input
/// always yields the same sequence.
pub fn select_due<C, I>(cards: I, now: Timestamp) -> DueCards<C>
where
    C: Schedulable,
    I: IntoIterator<Item = C>,
{
    let mut items: Vec<C> = cards
        .into_iter()
        .filter(|c| review::is_due(c.difficulty(), c.next_review(), now))
        .collect();
    items.sort_by_key(study_order_key);

    let total = items.len();
    DueCards { items, total }
}
