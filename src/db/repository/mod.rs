//! Repository Module
//!
//! CRUD operations over the SurrealDB tables. Every table except `user`
//! is owner-scoped: queries always filter on the owning user.

pub mod bill;
pub mod customer;
pub mod expense;
pub mod product;
pub mod user;

pub use bill::BillRepository;
pub use customer::CustomerRepository;
pub use expense::{ExpenseFilter, ExpenseRepository, ExpenseStats};
pub use product::ProductRepository;
pub use user::UserRepository;

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention: "table:id" strings everywhere on the wire
// =============================================================================
//
// surrealdb::RecordId handles all ids:
//   - parse: let id: RecordId = "bill:abc".parse()?;
//   - build: RecordId::from_table_key("bill", "abc")
//   - CRUD: db.select(id) / db.delete(id) take RecordId directly

/// Build a RecordId from either "table:id" or a bare key
pub fn parse_record_id(table: &str, id: &str) -> RepoResult<RecordId> {
    let key = id.strip_prefix(&format!("{table}:")).unwrap_or(id);
    if key.is_empty() || key.contains(':') {
        return Err(RepoError::Validation(format!("invalid id: {id}")));
    }
    Ok(RecordId::from_table_key(table, key))
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record_id_accepts_both_forms() {
        let a = parse_record_id("bill", "bill:abc").unwrap();
        let b = parse_record_id("bill", "abc").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "bill:abc");
    }

    #[test]
    fn test_parse_record_id_rejects_garbage() {
        assert!(parse_record_id("bill", "").is_err());
        assert!(parse_record_id("bill", "other:table:x").is_err());
    }
}
