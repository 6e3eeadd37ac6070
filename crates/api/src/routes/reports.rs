use axum::routing::{get, post};
use axum::Router;

use crate::handlers::reports;
use crate::state::AppState;

/// Progress report routes mounted at `/reports`.
///
/// ```text
/// POST /sessions        -> record_session
/// GET  /history         -> history
/// GET  /stats/overall   -> overall
/// GET  /stats/decks     -> by_deck
/// GET  /stats/tags      -> by_tag
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sessions", post(reports::record_session))
        .route("/history", get(reports::history))
        .route("/stats/overall", get(reports::overall))
        .route("/stats/decks", get(reports::by_deck))
        .route("/stats/tags", get(reports::by_tag))
}
