//! Database Module
//!
//! Embedded SurrealDB (RocksDB backend) connection and schema setup.

pub mod models;
pub mod repository;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

const NAMESPACE: &str = "cashmemo";
const DATABASE: &str = "cashmemo";

/// Database service, owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the embedded database and apply schema definitions
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        // Emails must be unique across accounts
        db.query("DEFINE INDEX IF NOT EXISTS user_email_idx ON TABLE user COLUMNS email UNIQUE")
            .await
            .map_err(|e| AppError::database(format!("Failed to define indexes: {e}")))?;

        tracing::info!(path = %db_path, "Database connection established (SurrealDB RocksDB)");

        Ok(Self { db })
    }
}
