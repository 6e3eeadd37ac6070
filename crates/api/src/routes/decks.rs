use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{cards, decks, study};
use crate::state::AppState;

/// Deck routes mounted at `/decks`.
///
/// ```text
/// GET    /               -> list
/// POST   /               -> create
/// GET    /{id}           -> get_by_id
/// PUT    /{id}           -> update
/// DELETE /{id}           -> delete
/// GET    /{id}/cards     -> cards::list_for_deck
/// POST   /{id}/cards     -> cards::create
/// GET    /{id}/study     -> study::deck_study
/// POST   /{id}/reset     -> study::deck_reset
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(decks::list).post(decks::create))
        .route(
            "/{id}",
            get(decks::get_by_id)
                .put(decks::update)
                .delete(decks::delete),
        )
        .route("/{id}/cards", get(cards::list_for_deck).post(cards::create))
        .route("/{id}/study", get(study::deck_study))
        .route("/{id}/reset", post(study::deck_reset))
}
