//! Route definitions for the `/api/books` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::books;
use crate::state::AppState;

const BOOKS: &str = "/api/books";

/// Book routes.
///
/// ```text
/// GET    /api/books                           -> list_books  (?page=&page_size=)
/// POST   /api/books                           -> create_book
/// GET    /api/books/search                    -> search_books (?q=)
/// GET    /api/books/{id}                      -> get_book
/// PUT    /api/books/{id}                      -> update_book
/// DELETE /api/books/{id}                      -> delete_book
/// POST   /api/books/{id}/toggle-availability  -> toggle_availability
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(BOOKS, get(books::list_books).post(books::create_book))
        .route(&format!("{BOOKS}/search"), get(books::search_books))
        .route(
            &format!("{BOOKS}/{{id}}"),
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        .route(
            &format!("{BOOKS}/{{id}}/toggle-availability"),
            post(books::toggle_availability),
        )
}
