//! Domain building blocks shared by the persistence and HTTP crates.
//!
//! Nothing in here performs I/O: the error taxonomy, identifier and
//! timestamp aliases, pagination normalization and search pattern helpers.

pub mod error;
pub mod pagination;
pub mod search;
pub mod types;
