//! User Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{User, UserCreate, now_millis};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "user";

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find user by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        let record_id = parse_record_id(TABLE, id)?;
        let user: Option<User> = self.base.db().select(record_id).await?;
        Ok(user)
    }

    /// Find user by email (lowercased)
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let email_owned = email.trim().to_lowercase();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE email = $email LIMIT 1")
            .bind(("email", email_owned))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Create a new user with a hashed password
    pub async fn create(&self, data: UserCreate) -> RepoResult<User> {
        let email = data.email.trim().to_lowercase();
        if self.find_by_email(&email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "An account with email '{email}' already exists"
            )));
        }

        let hash_pass = User::hash_password(&data.password)
            .map_err(|e| RepoError::Database(format!("Password hashing failed: {e}")))?;

        let user = User {
            id: None,
            name: data.name,
            email,
            hash_pass,
            business_name: data.business_name,
            business_logo: String::new(),
            created_at: now_millis(),
        };

        let created: Option<User> = self.base.db().create(TABLE).content(user).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }

    /// Update business profile fields (name, business_name)
    pub async fn update_business_info(
        &self,
        id: &str,
        name: Option<String>,
        business_name: Option<String>,
    ) -> RepoResult<User> {
        let record_id = parse_record_id(TABLE, id)?;

        let mut fields: Vec<&str> = Vec::new();
        if name.is_some() {
            fields.push("name = $name");
        }
        if business_name.is_some() {
            fields.push("business_name = $business_name");
        }
        if !fields.is_empty() {
            let query = format!("UPDATE $id SET {}", fields.join(", "));
            let mut q = self.base.db().query(query).bind(("id", record_id.clone()));
            if let Some(name) = name {
                q = q.bind(("name", name));
            }
            if let Some(business_name) = business_name {
                q = q.bind(("business_name", business_name));
            }
            q.await?;
        }

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("User {id} not found")))
    }

    /// Replace the business logo
    pub async fn update_logo(&self, id: &str, logo: String) -> RepoResult<User> {
        let record_id = parse_record_id(TABLE, id)?;
        self.base
            .db()
            .query("UPDATE $id SET business_logo = $logo")
            .bind(("id", record_id))
            .bind(("logo", logo))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("User {id} not found")))
    }
}
