//! Bill Model

use super::serde_helpers;
use super::user::UserId;
use crate::billing::{CalculationMode, ItemInput, RoundOff};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Bill ID type
pub type BillId = RecordId;

/// One calculated line on a stored bill
///
/// Totals are engine-computed at write time, never taken from clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub main_product: String,
    /// Sub-product names shown under the main label
    #[serde(default)]
    pub sub_products: Vec<String>,
    pub calculation_mode: CalculationMode,
    /// Units entered (piece mode)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_count: Option<f64>,
    /// Total size per unit (piece mode)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_unit_size: Option<f64>,
    /// Effective quantity (entered or derived)
    pub quantity: f64,
    pub unit_price: f64,
    pub line_total: f64,
}

/// Raw line entry from a client, calculation input plus display labels
#[derive(Debug, Clone, Deserialize)]
pub struct LineItemInput {
    pub main_product: String,
    #[serde(flatten)]
    pub calc: ItemInput,
}

/// Stored bill
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bill {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<BillId>,
    #[serde(with = "serde_helpers::record_id")]
    pub user: UserId,
    pub bill_number: String,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_mobile: String,
    #[serde(default)]
    pub ship_to_address: String,
    pub items: Vec<LineItem>,
    pub subtotal: f64,
    #[serde(default)]
    pub loading_charge: f64,
    #[serde(default)]
    pub transport_charge: f64,
    /// Signed adjustment applied to reach the grand total
    #[serde(default)]
    pub round_off: f64,
    pub grand_total: f64,
    pub created_at: i64,
}

/// Create bill payload
///
/// Clients send raw entry data; the server derives quantities, line
/// totals and aggregates.
#[derive(Debug, Clone, Deserialize)]
pub struct BillCreate {
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_mobile: String,
    #[serde(default)]
    pub ship_to_address: String,
    pub items: Vec<LineItemInput>,
    pub loading_charge: Option<f64>,
    pub transport_charge: Option<f64>,
    #[serde(default)]
    pub round_off: RoundOff,
}

/// Update bill payload, absent fields keep their stored values
#[derive(Debug, Clone, Deserialize)]
pub struct BillUpdate {
    pub customer_name: Option<String>,
    pub customer_mobile: Option<String>,
    pub ship_to_address: Option<String>,
    /// Replaces all items when present
    pub items: Option<Vec<LineItemInput>>,
    pub loading_charge: Option<f64>,
    pub transport_charge: Option<f64>,
    pub round_off: Option<RoundOff>,
}
