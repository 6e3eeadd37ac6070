use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{study, tags};
use crate::state::AppState;

/// Tag routes mounted at `/tags`.
///
/// ```text
/// GET    /              -> list
/// POST   /              -> create
/// DELETE /{id}          -> delete
/// GET    /{id}/study    -> study::tag_study
/// POST   /{id}/reset    -> study::tag_reset
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tags::list).post(tags::create))
        .route("/{id}", delete(tags::delete))
        .route("/{id}/study", get(study::tag_study))
        .route("/{id}/reset", post(study::tag_reset))
}
