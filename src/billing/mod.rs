//! Bill calculation engine
//!
//! Pure calculation logic, no database or HTTP concerns:
//! - [`item_calculator`] - per-line-item totals (weight and piece modes)
//! - [`bill_calculator`] - bill aggregates (subtotal, charges, round-off)
//! - [`amount_words`] - amount-in-words rendering (Indian numbering)
//!
//! Uses rust_decimal for precision calculations.

pub mod amount_words;
pub mod bill_calculator;
pub mod item_calculator;

pub use amount_words::number_to_words;
pub use bill_calculator::{BillTotals, RoundOff, calculate_bill_totals, coerce_charge};
pub use item_calculator::{
    CalcError, CalculationMode, ItemInput, ItemResult, SubProductInput, calculate_item, to_decimal,
    to_f64,
};
