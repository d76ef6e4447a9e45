//! Handlers for the `/api/books` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use booklib_core::search::normalize_query;
use booklib_db::models::book::CreateBook;

use crate::error::{AppError, AppResult};
use crate::extract::{IdPath, QueryPairs, ValidatedJson};
use crate::query::{PageParams, SearchParams};
use crate::state::AppState;

/// Response header carrying the total number of books.
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// POST /api/books
///
/// Create a new book. New books are always available.
pub async fn create_book(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateBook>,
) -> AppResult<impl IntoResponse> {
    let book = state.books.create_book(input).await?;

    tracing::info!(book_id = book.id, isbn = %book.isbn, "Book created");

    Ok((StatusCode::CREATED, Json(book)))
}

/// GET /api/books?page=&page_size=
///
/// List one page of books. The total row count is returned in
/// `X-Total-Count`.
pub async fn list_books(
    State(state): State<AppState>,
    query: QueryPairs,
) -> AppResult<impl IntoResponse> {
    let (page, page_size) = PageParams::from(&query).raw();
    let page = state.books.get_all_books(page, page_size).await?;

    Ok((
        [(TOTAL_COUNT_HEADER, page.total.to_string())],
        Json(page.books),
    ))
}

/// GET /api/books/{id}
pub async fn get_book(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<impl IntoResponse> {
    let book = state.books.get_book_by_id(id).await?;
    Ok(Json(book))
}

/// PUT /api/books/{id}
///
/// Replace every editable field of a book.
pub async fn update_book(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<CreateBook>,
) -> AppResult<impl IntoResponse> {
    let book = state.books.update_book(id, input).await?;

    tracing::info!(book_id = id, isbn = %book.isbn, "Book updated");

    Ok(Json(book))
}

/// DELETE /api/books/{id}
pub async fn delete_book(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<impl IntoResponse> {
    state.books.delete_book(id).await?;

    tracing::info!(book_id = id, "Book deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/books/search?q=
///
/// Case-insensitive substring search over title and author.
pub async fn search_books(
    State(state): State<AppState>,
    query: QueryPairs,
) -> AppResult<impl IntoResponse> {
    let params = SearchParams::from(&query);
    let query = normalize_query(params.q.as_deref())
        .ok_or_else(|| AppError::BadRequest("Search parameter 'q' is required".into()))?;

    let books = state.books.search_books(query).await?;

    tracing::debug!(query, hits = books.len(), "Book search");

    Ok(Json(books))
}

/// POST /api/books/{id}/toggle-availability
pub async fn toggle_availability(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<impl IntoResponse> {
    let book = state.books.toggle_book_availability(id).await?;

    tracing::info!(book_id = id, available = book.available, "Book availability toggled");

    Ok(Json(book))
}
