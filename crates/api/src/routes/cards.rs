use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::cards;
use crate::state::AppState;

/// Card routes mounted at `/cards`.
///
/// ```text
/// GET    /{id}                  -> get_by_id
/// PUT    /{id}                  -> update
/// DELETE /{id}                  -> delete
/// POST   /{id}/difficulty       -> rate
/// POST   /{id}/reset            -> reset
/// GET    /{id}/tags             -> list_tags
/// POST   /{id}/tags             -> attach_tag
/// DELETE /{id}/tags/{tag_id}    -> detach_tag
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(cards::get_by_id)
                .put(cards::update)
                .delete(cards::delete),
        )
        .route("/{id}/difficulty", post(cards::rate))
        .route("/{id}/reset", post(cards::reset))
        .route("/{id}/tags", get(cards::list_tags).post(cards::attach_tag))
        .route("/{id}/tags/{tag_id}", delete(cards::detach_tag))
}
