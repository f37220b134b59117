//! Customer Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{Customer, CustomerCreate, CustomerUpdate, UserId, now_millis};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "customer";

/// Max rows returned by the typeahead search
const SEARCH_LIMIT: usize = 10;

#[derive(Clone)]
pub struct CustomerRepository {
    base: BaseRepository,
}

impl CustomerRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All customers owned by a user, ordered by name
    pub async fn find_all_for_user(&self, user: &UserId) -> RepoResult<Vec<Customer>> {
        let customers: Vec<Customer> = self
            .base
            .db()
            .query("SELECT * FROM customer WHERE user = $user ORDER BY name")
            .bind(("user", user.clone()))
            .await?
            .take(0)?;
        Ok(customers)
    }

    /// Case-insensitive substring search on customer names (typeahead)
    pub async fn search(&self, user: &UserId, query: &str) -> RepoResult<Vec<Customer>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(vec![]);
        }

        let customers: Vec<Customer> = self
            .base
            .db()
            .query(format!(
                "SELECT * FROM customer \
                 WHERE user = $user AND string::contains(string::lowercase(name), $q) \
                 ORDER BY name LIMIT {SEARCH_LIMIT}"
            ))
            .bind(("user", user.clone()))
            .bind(("q", needle))
            .await?
            .take(0)?;
        Ok(customers)
    }

    /// Find customer by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Customer>> {
        let record_id = parse_record_id(TABLE, id)?;
        let customer: Option<Customer> = self.base.db().select(record_id).await?;
        Ok(customer)
    }

    /// Find customer by exact name within one user's book
    pub async fn find_by_name(&self, user: &UserId, name: &str) -> RepoResult<Option<Customer>> {
        let name_owned = name.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM customer WHERE user = $user AND name = $name LIMIT 1")
            .bind(("user", user.clone()))
            .bind(("name", name_owned))
            .await?;
        let customers: Vec<Customer> = result.take(0)?;
        Ok(customers.into_iter().next())
    }

    /// Create a new customer
    pub async fn create(&self, user: &UserId, data: CustomerCreate) -> RepoResult<Customer> {
        if self.find_by_name(user, data.name.trim()).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Customer '{}' already exists",
                data.name.trim()
            )));
        }

        let now = now_millis();
        let customer = Customer {
            id: None,
            user: user.clone(),
            name: data.name.trim().to_string(),
            mobile: data.mobile.trim().to_string(),
            address: data.address.trim().to_string(),
            created_at: now,
            updated_at: now,
        };

        let created: Option<Customer> = self.base.db().create(TABLE).content(customer).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create customer".to_string()))
    }

    /// Update a customer
    pub async fn update(&self, id: &str, mut data: CustomerUpdate) -> RepoResult<Customer> {
        let record_id = parse_record_id(TABLE, id)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Customer {id} not found")))?;

        if let Some(ref new_name) = data.name
            && new_name.trim() != existing.name
            && self
                .find_by_name(&existing.user, new_name.trim())
                .await?
                .is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Customer '{}' already exists",
                new_name.trim()
            )));
        }

        data.name = data.name.map(|s| s.trim().to_string());
        data.mobile = data.mobile.map(|s| s.trim().to_string());
        data.address = data.address.map(|s| s.trim().to_string());

        let mut merge = serde_json::to_value(&data)
            .map_err(|e| RepoError::Database(format!("Failed to encode update: {e}")))?;
        merge["updated_at"] = serde_json::json!(now_millis());

        self.base
            .db()
            .query("UPDATE $id MERGE $data")
            .bind(("id", record_id))
            .bind(("data", merge))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Customer {id} not found")))
    }

    /// Hard delete a customer
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let record_id = parse_record_id(TABLE, id)?;
        let deleted: Option<Customer> = self.base.db().delete(record_id).await?;
        Ok(deleted.is_some())
    }
}
