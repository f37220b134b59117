//! Product Model

use super::serde_helpers;
use super::user::UserId;
use crate::billing::CalculationMode;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Product ID type
pub type ProductId = RecordId;

/// A sub-product of a piece-mode product (e.g. a sheet length)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubProduct {
    pub name: String,
    #[serde(default)]
    pub price: f64,
    /// Size contributed per unit, used for quantity derivation
    #[serde(default)]
    pub size: f64,
}

/// Product catalog entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<ProductId>,
    #[serde(with = "serde_helpers::record_id")]
    pub user: UserId,
    pub main_product: String,
    pub calculation_mode: CalculationMode,
    #[serde(default)]
    pub sub_products: Vec<SubProduct>,
    pub created_at: i64,
}

/// Create product payload
#[derive(Debug, Clone, Deserialize)]
pub struct ProductCreate {
    pub main_product: String,
    #[serde(default = "default_mode")]
    pub calculation_mode: CalculationMode,
    #[serde(default)]
    pub sub_products: Vec<SubProduct>,
}

fn default_mode() -> CalculationMode {
    CalculationMode::Weight
}

/// Update product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_product: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calculation_mode: Option<CalculationMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_products: Option<Vec<SubProduct>>,
}
