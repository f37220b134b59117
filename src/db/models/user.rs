//! User Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// User ID type
pub type UserId = RecordId;

/// User account, one per business
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<UserId>,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub hash_pass: String,
    pub business_name: String,
    /// Logo image as a data URL, empty when unset
    #[serde(default)]
    pub business_logo: String,
    pub created_at: i64,
}

/// Create user payload (signup)
#[derive(Debug, Clone, Deserialize)]
pub struct UserCreate {
    pub name: String,
    pub email: String,
    pub password: String,
    pub business_name: String,
}

impl User {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.hash_pass)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash password using argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_and_verify() {
        let hash = User::hash_password("secret123").unwrap();
        let user = User {
            id: None,
            name: "Ravi".to_string(),
            email: "ravi@example.com".to_string(),
            hash_pass: hash,
            business_name: "Ravi Traders".to_string(),
            business_logo: String::new(),
            created_at: 0,
        };

        assert!(user.verify_password("secret123").unwrap());
        assert!(!user.verify_password("wrong").unwrap());
    }

    #[test]
    fn test_hash_pass_never_serialized() {
        let user = User {
            id: None,
            name: "Ravi".to_string(),
            email: "ravi@example.com".to_string(),
            hash_pass: "hashed".to_string(),
            business_name: "Ravi Traders".to_string(),
            business_logo: String::new(),
            created_at: 0,
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("hash_pass"));
        assert!(!json.contains("hashed"));
    }
}
