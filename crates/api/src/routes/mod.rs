pub mod books;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /api/books                                  list, create
/// /api/books/search                           substring search (?q=)
/// /api/books/{id}                             get, replace, delete
/// /api/books/{id}/toggle-availability         flip availability (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(books::router())
}
