//! Database models
//!
//! All records are scoped to an owning `user` except the user itself.
//! Ids follow the "table:id" string convention on the wire.

pub mod bill;
pub mod customer;
pub mod expense;
pub mod product;
pub mod serde_helpers;
pub mod user;

pub use bill::{Bill, BillCreate, BillId, BillUpdate, LineItem, LineItemInput};
pub use customer::{Customer, CustomerCreate, CustomerId, CustomerUpdate};
pub use expense::{Expense, ExpenseCreate, ExpenseId, ExpenseType, ExpenseUpdate, PaymentMethod};
pub use product::{Product, ProductCreate, ProductId, ProductUpdate, SubProduct};
pub use user::{User, UserCreate, UserId};

/// Current timestamp in epoch milliseconds, the storage format for all dates
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
