//! Repository for the `books` table.

use booklib_core::pagination::PageRequest;
use booklib_core::search::substring_pattern;
use booklib_core::types::DbId;
use sqlx::PgPool;

use crate::models::book::{Book, NewBook};

/// Column list for `books` queries.
const COLUMNS: &str = "\
    id, title, author, isbn, description, year, publisher, \
    available, created_at, updated_at";

/// Provides data access for books.
pub struct BookRepo;

impl BookRepo {
    /// Insert a new book, returning the stored row with its generated id
    /// and timestamps.
    pub async fn create(pool: &PgPool, book: &NewBook) -> Result<Book, sqlx::Error> {
        let query = format!(
            "INSERT INTO books \
                 (title, author, isbn, description, year, publisher, available) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(&book.title)
            .bind(&book.author)
            .bind(&book.isbn)
            .bind(&book.description)
            .bind(book.year)
            .bind(&book.publisher)
            .bind(book.available)
            .fetch_one(pool)
            .await
    }

    /// Find a book by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Book>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM books WHERE id = $1");
        sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a book by its ISBN.
    pub async fn find_by_isbn(pool: &PgPool, isbn: &str) -> Result<Option<Book>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM books WHERE isbn = $1");
        sqlx::query_as::<_, Book>(&query)
            .bind(isbn)
            .fetch_optional(pool)
            .await
    }

    /// List one page of books in id order.
    pub async fn list(pool: &PgPool, page: PageRequest) -> Result<Vec<Book>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM books ORDER BY id LIMIT $1 OFFSET $2");
        sqlx::query_as::<_, Book>(&query)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await
    }

    /// Total number of books.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM books")
            .fetch_one(pool)
            .await
    }

    /// Rewrite every mutable column of an existing row.
    ///
    /// Returns `None` if no row with `book.id` exists.
    pub async fn update(pool: &PgPool, book: &Book) -> Result<Option<Book>, sqlx::Error> {
        let query = format!(
            "UPDATE books SET \
                 title = $2, \
                 author = $3, \
                 isbn = $4, \
                 description = $5, \
                 year = $6, \
                 publisher = $7, \
                 available = $8 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(book.id)
            .bind(&book.title)
            .bind(&book.author)
            .bind(&book.isbn)
            .bind(&book.description)
            .bind(book.year)
            .bind(&book.publisher)
            .bind(book.available)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a book by ID.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Case-insensitive substring match on title or author, in id order.
    pub async fn search(pool: &PgPool, query: &str) -> Result<Vec<Book>, sqlx::Error> {
        let sql = format!(
            "SELECT {COLUMNS} FROM books \
             WHERE title ILIKE $1 OR author ILIKE $1 \
             ORDER BY id"
        );
        sqlx::query_as::<_, Book>(&sql)
            .bind(substring_pattern(query))
            .fetch_all(pool)
            .await
    }
}
