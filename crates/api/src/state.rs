use std::sync::Arc;

use booklib_db::store::PgBookStore;

use crate::services::BookService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: booklib_db::DbPool,
    /// Book business rules, backed by the pool.
    pub books: BookService,
}

impl AppState {
    /// Wire the PostgreSQL-backed service onto `pool`.
    pub fn new(pool: booklib_db::DbPool) -> Self {
        let books = BookService::new(Arc::new(PgBookStore::new(pool.clone())));
        Self { pool, books }
    }
}
