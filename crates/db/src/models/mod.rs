//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` DTO for request payloads
//! - An insert struct carrying the values the accessor writes

pub mod book;
