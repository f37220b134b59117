//! Expense Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{Expense, ExpenseCreate, ExpenseType, ExpenseUpdate, UserId, now_millis};
use serde::{Deserialize, Serialize};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "expense";

/// Optional filters for expense listings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExpenseFilter {
    /// Inclusive lower bound on date, epoch millis
    pub start_date: Option<i64>,
    /// Inclusive upper bound on date, epoch millis
    pub end_date: Option<i64>,
    pub expense_type: Option<ExpenseType>,
}

/// Per-category aggregate used by the stats endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeStat {
    pub expense_type: ExpenseType,
    pub total: f64,
    pub count: i64,
}

/// Expense summary for one user and filter window
#[derive(Debug, Clone, Serialize)]
pub struct ExpenseStats {
    pub total: f64,
    pub count: i64,
    pub by_type: Vec<TypeStat>,
}

#[derive(Clone)]
pub struct ExpenseRepository {
    base: BaseRepository,
}

impl ExpenseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn filter_clause(filter: &ExpenseFilter) -> String {
        let mut clause = String::from("user = $user");
        if filter.start_date.is_some() {
            clause.push_str(" AND date >= $start_date");
        }
        if filter.end_date.is_some() {
            clause.push_str(" AND date <= $end_date");
        }
        if filter.expense_type.is_some() {
            clause.push_str(" AND expense_type = $expense_type");
        }
        clause
    }

    /// Expenses owned by a user matching the filter, newest first
    pub async fn find_all_for_user(
        &self,
        user: &UserId,
        filter: &ExpenseFilter,
    ) -> RepoResult<Vec<Expense>> {
        let query = format!(
            "SELECT * FROM expense WHERE {} ORDER BY date DESC",
            Self::filter_clause(filter)
        );

        let mut q = self.base.db().query(query).bind(("user", user.clone()));
        if let Some(from) = filter.start_date {
            q = q.bind(("start_date", from));
        }
        if let Some(to) = filter.end_date {
            q = q.bind(("end_date", to));
        }
        if let Some(expense_type) = filter.expense_type {
            q = q.bind(("expense_type", expense_type));
        }

        let expenses: Vec<Expense> = q.await?.take(0)?;
        Ok(expenses)
    }

    /// Aggregate totals per category plus an overall sum
    pub async fn stats_for_user(
        &self,
        user: &UserId,
        filter: &ExpenseFilter,
    ) -> RepoResult<ExpenseStats> {
        let query = format!(
            "SELECT expense_type, math::sum(amount) AS total, count() AS count \
             FROM expense WHERE {} GROUP BY expense_type",
            Self::filter_clause(filter)
        );

        let mut q = self.base.db().query(query).bind(("user", user.clone()));
        if let Some(from) = filter.start_date {
            q = q.bind(("start_date", from));
        }
        if let Some(to) = filter.end_date {
            q = q.bind(("end_date", to));
        }
        if let Some(expense_type) = filter.expense_type {
            q = q.bind(("expense_type", expense_type));
        }

        let by_type: Vec<TypeStat> = q.await?.take(0)?;
        let total = by_type.iter().map(|s| s.total).sum();
        let count = by_type.iter().map(|s| s.count).sum();

        Ok(ExpenseStats {
            total,
            count,
            by_type,
        })
    }

    /// Find expense by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Expense>> {
        let record_id = parse_record_id(TABLE, id)?;
        let expense: Option<Expense> = self.base.db().select(record_id).await?;
        Ok(expense)
    }

    /// Create a new expense
    pub async fn create(&self, user: &UserId, data: ExpenseCreate) -> RepoResult<Expense> {
        let now = now_millis();
        let expense = Expense {
            id: None,
            user: user.clone(),
            expense_type: data.expense_type,
            description: data.description,
            amount: data.amount,
            date: data.date.unwrap_or(now),
            notes: data.notes,
            payment_method: data.payment_method,
            created_at: now,
        };

        let created: Option<Expense> = self.base.db().create(TABLE).content(expense).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create expense".to_string()))
    }

    /// Update an expense
    pub async fn update(&self, id: &str, data: ExpenseUpdate) -> RepoResult<Expense> {
        let record_id = parse_record_id(TABLE, id)?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Expense {id} not found")))?;

        self.base
            .db()
            .query("UPDATE $id MERGE $data")
            .bind(("id", record_id))
            .bind(("data", data))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Expense {id} not found")))
    }

    /// Hard delete an expense
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let record_id = parse_record_id(TABLE, id)?;
        let deleted: Option<Expense> = self.base.db().delete(record_id).await?;
        Ok(deleted.is_some())
    }
}
