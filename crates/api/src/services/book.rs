//! Business rules for books.
//!
//! [`BookService`] enforces ISBN uniqueness ahead of writes, normalizes
//! pagination and owns the availability toggle. Storage is reached only
//! through the injected [`BookStore`].
//!
//! The ISBN lookup is a fast path for a friendly rejection. It is not atomic
//! with the write that follows it; the `uq_books_isbn` index is the real
//! guard and the store reports its violation as the same conflict.

use std::sync::Arc;

use booklib_core::error::CoreError;
use booklib_core::pagination::PageRequest;
use booklib_core::types::DbId;
use booklib_db::models::book::{Book, CreateBook, NewBook};
use booklib_db::store::{BookStore, BOOK_ENTITY};

/// One page of books plus the total row count.
#[derive(Debug)]
pub struct BookPage {
    pub books: Vec<Book>,
    pub total: i64,
}

#[derive(Clone)]
pub struct BookService {
    store: Arc<dyn BookStore>,
}

impl BookService {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self { store }
    }

    /// Create a new, available book. Fails with a conflict if the ISBN is
    /// already taken.
    pub async fn create_book(&self, input: CreateBook) -> Result<Book, CoreError> {
        if self.store.get_by_isbn(&input.isbn).await?.is_some() {
            return Err(CoreError::duplicate_isbn(&input.isbn));
        }
        self.store.create(NewBook::available(input)).await
    }

    pub async fn get_book_by_id(&self, id: DbId) -> Result<Book, CoreError> {
        self.store.get_by_id(id).await
    }

    /// List a page of books. Non-positive `page` / `page_size` are floored
    /// to 1 / 10.
    pub async fn get_all_books(&self, page: i64, page_size: i64) -> Result<BookPage, CoreError> {
        let page = PageRequest::new(page, page_size);
        let books = self.store.get_all(page).await?;
        let total = self.store.count().await?;
        Ok(BookPage { books, total })
    }

    /// Replace every editable field of an existing book.
    ///
    /// `available` and the timestamps are not touched by this path.
    pub async fn update_book(&self, id: DbId, input: CreateBook) -> Result<Book, CoreError> {
        let mut book = self.store.get_by_id(id).await?;

        if book.isbn != input.isbn {
            if let Some(holder) = self.store.get_by_isbn(&input.isbn).await? {
                if holder.id != id {
                    return Err(CoreError::duplicate_isbn(&input.isbn));
                }
            }
        }

        book.apply(input);
        self.store.update(&book).await
    }

    /// Hard-delete a book. Deleting an id that does not exist is NotFound.
    pub async fn delete_book(&self, id: DbId) -> Result<(), CoreError> {
        if self.store.delete(id).await? {
            Ok(())
        } else {
            Err(CoreError::NotFound {
                entity: BOOK_ENTITY,
                id,
            })
        }
    }

    pub async fn search_books(&self, query: &str) -> Result<Vec<Book>, CoreError> {
        self.store.search(query).await
    }

    pub async fn toggle_book_availability(&self, id: DbId) -> Result<Book, CoreError> {
        let mut book = self.store.get_by_id(id).await?;
        book.available = !book.available;
        self.store.update(&book).await
    }
}
