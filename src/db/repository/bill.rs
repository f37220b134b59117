//! Bill Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{Bill, UserId, now_millis};
use serde::Deserialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "bill";

#[derive(Debug, Deserialize)]
struct CountRow {
    count: i64,
}

#[derive(Clone)]
pub struct BillRepository {
    base: BaseRepository,
}

impl BillRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All bills owned by a user, newest first
    pub async fn find_all_for_user(&self, user: &UserId) -> RepoResult<Vec<Bill>> {
        let bills: Vec<Bill> = self
            .base
            .db()
            .query("SELECT * FROM bill WHERE user = $user ORDER BY created_at DESC")
            .bind(("user", user.clone()))
            .await?
            .take(0)?;
        Ok(bills)
    }

    /// Find bill by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Bill>> {
        let record_id = parse_record_id(TABLE, id)?;
        let bill: Option<Bill> = self.base.db().select(record_id).await?;
        Ok(bill)
    }

    /// Number of bills a user has created
    pub async fn count_for_user(&self, user: &UserId) -> RepoResult<i64> {
        let rows: Vec<CountRow> = self
            .base
            .db()
            .query("SELECT count() AS count FROM bill WHERE user = $user GROUP ALL")
            .bind(("user", user.clone()))
            .await?
            .take(0)?;
        Ok(rows.first().map(|r| r.count).unwrap_or(0))
    }

    /// Persist a calculated bill, assigning its bill number
    ///
    /// Bill numbers are `BILL-<epoch-ms>-<seq>` where seq is the user's
    /// bill count plus one. The timestamp component keeps numbers unique
    /// even if bills are later deleted.
    pub async fn create(&self, mut bill: Bill) -> RepoResult<Bill> {
        let count = self.count_for_user(&bill.user).await?;
        let now = now_millis();
        bill.id = None;
        bill.bill_number = format!("BILL-{now}-{}", count + 1);
        bill.created_at = now;

        let created: Option<Bill> = self.base.db().create(TABLE).content(bill).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create bill".to_string()))
    }

    /// Replace a bill's content, keeping its number and creation time
    pub async fn update(&self, id: &str, mut bill: Bill) -> RepoResult<Bill> {
        let record_id = parse_record_id(TABLE, id)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Bill {id} not found")))?;

        bill.id = None;
        bill.bill_number = existing.bill_number;
        bill.created_at = existing.created_at;

        let updated: Option<Bill> = self.base.db().update(record_id).content(bill).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Bill {id} not found")))
    }

    /// Hard delete a bill
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let record_id = parse_record_id(TABLE, id)?;
        let deleted: Option<Bill> = self.base.db().delete(record_id).await?;
        Ok(deleted.is_some())
    }
}
