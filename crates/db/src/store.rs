//! The accessor seam between the business service and storage.
//!
//! [`BookStore`] is what the service is constructed with; [`PgBookStore`]
//! is the PostgreSQL implementation backed by [`BookRepo`]. Storage errors
//! are classified into [`CoreError`] here so that callers never inspect
//! driver errors.

use async_trait::async_trait;
use booklib_core::error::CoreError;
use booklib_core::pagination::PageRequest;
use booklib_core::types::DbId;

use crate::models::book::{Book, NewBook};
use crate::repositories::BookRepo;
use crate::DbPool;

/// Name of the unique constraint on `books.isbn`.
pub const ISBN_UNIQUE_CONSTRAINT: &str = "uq_books_isbn";

/// PostgreSQL SQLSTATE for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

/// Entity name used in not-found errors.
pub const BOOK_ENTITY: &str = "Book";

/// Entity operations over the book table.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Insert a row. A duplicate ISBN is reported as [`CoreError::Conflict`].
    async fn create(&self, book: NewBook) -> Result<Book, CoreError>;

    /// Fetch by id or fail with [`CoreError::NotFound`].
    async fn get_by_id(&self, id: DbId) -> Result<Book, CoreError>;

    /// Uniqueness lookup.
    async fn get_by_isbn(&self, isbn: &str) -> Result<Option<Book>, CoreError>;

    async fn get_all(&self, page: PageRequest) -> Result<Vec<Book>, CoreError>;

    async fn count(&self) -> Result<i64, CoreError>;

    /// Full-row rewrite by primary key. Fails with [`CoreError::NotFound`]
    /// if the row has been deleted in the meantime.
    async fn update(&self, book: &Book) -> Result<Book, CoreError>;

    /// Hard delete. Returns `false` when nothing matched.
    async fn delete(&self, id: DbId) -> Result<bool, CoreError>;

    async fn search(&self, query: &str) -> Result<Vec<Book>, CoreError>;
}

/// [`BookStore`] over a PostgreSQL pool.
#[derive(Clone)]
pub struct PgBookStore {
    pool: DbPool,
}

impl PgBookStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for PgBookStore {
    async fn create(&self, book: NewBook) -> Result<Book, CoreError> {
        BookRepo::create(&self.pool, &book)
            .await
            .map_err(|e| classify(e, &book.isbn))
    }

    async fn get_by_id(&self, id: DbId) -> Result<Book, CoreError> {
        BookRepo::find_by_id(&self.pool, id)
            .await
            .map_err(internal)?
            .ok_or(CoreError::NotFound {
                entity: BOOK_ENTITY,
                id,
            })
    }

    async fn get_by_isbn(&self, isbn: &str) -> Result<Option<Book>, CoreError> {
        BookRepo::find_by_isbn(&self.pool, isbn)
            .await
            .map_err(internal)
    }

    async fn get_all(&self, page: PageRequest) -> Result<Vec<Book>, CoreError> {
        BookRepo::list(&self.pool, page).await.map_err(internal)
    }

    async fn count(&self) -> Result<i64, CoreError> {
        BookRepo::count(&self.pool).await.map_err(internal)
    }

    async fn update(&self, book: &Book) -> Result<Book, CoreError> {
        BookRepo::update(&self.pool, book)
            .await
            .map_err(|e| classify(e, &book.isbn))?
            .ok_or(CoreError::NotFound {
                entity: BOOK_ENTITY,
                id: book.id,
            })
    }

    async fn delete(&self, id: DbId) -> Result<bool, CoreError> {
        BookRepo::delete(&self.pool, id).await.map_err(internal)
    }

    async fn search(&self, query: &str) -> Result<Vec<Book>, CoreError> {
        BookRepo::search(&self.pool, query).await.map_err(internal)
    }
}

/// Map a write error, turning a violation of [`ISBN_UNIQUE_CONSTRAINT`]
/// into the duplicate-ISBN conflict.
fn classify(err: sqlx::Error, isbn: &str) -> CoreError {
    if is_isbn_unique_violation(&err) {
        tracing::warn!(isbn, "Unique index rejected duplicate ISBN");
        return CoreError::duplicate_isbn(isbn);
    }
    internal(err)
}

fn is_isbn_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some(UNIQUE_VIOLATION)
                && db_err.constraint() == Some(ISBN_UNIQUE_CONSTRAINT)
        }
        _ => false,
    }
}

fn internal(err: sqlx::Error) -> CoreError {
    CoreError::Internal(format!("Database error: {err}"))
}
