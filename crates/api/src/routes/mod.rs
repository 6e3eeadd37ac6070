pub mod auth;
pub mod cards;
pub mod decks;
pub mod health;
pub mod reports;
pub mod tags;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                     register (public)
/// /auth/login                        login (public)
///
/// /decks                             list, create
/// /decks/{id}                        get, update, delete
/// /decks/{id}/cards                  list, create
/// /decks/{id}/study                  due cards in the deck
/// /decks/{id}/reset                  reset every card in the deck
///
/// /cards/{id}                        get, update, delete
/// /cards/{id}/difficulty             rate (1-5)
/// /cards/{id}/reset                  reset to new
/// /cards/{id}/tags                   list, attach
/// /cards/{id}/tags/{tag_id}          detach
///
/// /tags                              list, create
/// /tags/{id}                         delete
/// /tags/{id}/study                   due cards carrying the tag
/// /tags/{id}/reset                   reset every card carrying the tag
///
/// /reports/sessions                  record a study session
/// /reports/history                   session history
/// /reports/stats/{overall,decks,tags} aggregate statistics
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/decks", decks::router())
        .nest("/cards", cards::router())
        .nest("/tags", tags::router())
        .nest("/reports", reports::router())
}
