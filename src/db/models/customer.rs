//! Customer Model

use super::serde_helpers;
use super::user::UserId;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Customer ID type
pub type CustomerId = RecordId;

/// Saved customer for quick bill entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<CustomerId>,
    #[serde(with = "serde_helpers::record_id")]
    pub user: UserId,
    pub name: String,
    #[serde(default)]
    pub mobile: String,
    #[serde(default)]
    pub address: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create customer payload
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerCreate {
    pub name: String,
    #[serde(default)]
    pub mobile: String,
    #[serde(default)]
    pub address: String,
}

/// Update customer payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}
