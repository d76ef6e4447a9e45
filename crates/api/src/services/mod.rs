//! Business services sitting between the HTTP handlers and storage.

pub mod book;

pub use book::{BookPage, BookService};
