//! Expense Model

use super::serde_helpers;
use super::user::UserId;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Expense ID type
pub type ExpenseId = RecordId;

/// Expense category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpenseType {
    Loading,
    Transport,
    Packaging,
    Labor,
    Utilities,
    Rent,
    Marketing,
    Maintenance,
    Other,
}

/// How an expense was paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    #[serde(rename = "UPI")]
    Upi,
    #[serde(rename = "Bank Transfer")]
    BankTransfer,
    Other,
}

/// Business expense record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<ExpenseId>,
    #[serde(with = "serde_helpers::record_id")]
    pub user: UserId,
    pub expense_type: ExpenseType,
    pub description: String,
    pub amount: f64,
    /// Expense date, epoch milliseconds
    pub date: i64,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    pub created_at: i64,
}

/// Create expense payload
#[derive(Debug, Clone, Deserialize)]
pub struct ExpenseCreate {
    pub expense_type: ExpenseType,
    pub description: String,
    pub amount: f64,
    /// Defaults to now when absent
    pub date: Option<i64>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub payment_method: PaymentMethod,
}

/// Update expense payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expense_type: Option<ExpenseType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_wire_names() {
        assert_eq!(
            serde_json::to_value(PaymentMethod::Upi).unwrap(),
            serde_json::json!("UPI")
        );
        assert_eq!(
            serde_json::to_value(PaymentMethod::BankTransfer).unwrap(),
            serde_json::json!("Bank Transfer")
        );
        let parsed: PaymentMethod = serde_json::from_value(serde_json::json!("Cash")).unwrap();
        assert_eq!(parsed, PaymentMethod::Cash);
    }
}
