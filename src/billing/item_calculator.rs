//! Line-Item Calculator
//!
//! Calculate a single bill line with support for:
//! - Weight mode: quantity is entered directly (kg, litres, metres...)
//! - Piece mode: quantity is derived from unit count and per-unit sizes
//!
//! Uses rust_decimal for precision calculations.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rounding precision for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// How a line item's quantity is obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalculationMode {
    /// Quantity entered directly
    Weight,
    /// Quantity derived from unit count and sub-product sizes
    Piece,
}

/// A sub-product attached to a piece-mode item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubProductInput {
    pub name: String,
    /// Size contributed by each unit of this sub-product
    pub per_unit_size: f64,
    pub unit_price: f64,
}

/// Raw input for one line item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemInput {
    pub mode: CalculationMode,
    /// Direct quantity (weight mode)
    pub quantity: Option<f64>,
    /// Number of units (piece mode)
    pub unit_count: Option<f64>,
    /// Price per quantity unit
    pub unit_price: Option<f64>,
    /// Sub-products (piece mode)
    #[serde(default)]
    pub sub_products: Vec<SubProductInput>,
}

/// Calculated values for one line item
#[derive(Debug, Clone, Serialize)]
pub struct ItemResult {
    /// Effective quantity (entered or derived)
    pub quantity: f64,
    pub unit_price: f64,
    /// quantity * unit_price, rounded to 2 places
    pub line_total: f64,
}

/// Calculation failures for a line item
#[derive(Debug, Error, PartialEq)]
pub enum CalcError {
    /// Input is missing or out of range
    #[error("{0}")]
    Validation(String),

    /// Inputs are individually valid but no quantity can be derived
    #[error("{0}")]
    Derivation(String),
}

// ==================== Conversion Helpers ====================

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

// ==================== Calculation ====================

/// Calculate one line item
///
/// # Weight mode
///
/// Requires `quantity > 0` and `unit_price > 0`.
/// `line_total = quantity * unit_price`.
///
/// # Piece mode
///
/// Requires `unit_count > 0`, `unit_price > 0` and at least one
/// sub-product. The effective quantity is
/// `round(unit_count * sum(per_unit_size))` and the total is
/// `quantity * unit_price`. When every sub-product size is zero no
/// quantity can be derived and the calculation fails.
pub fn calculate_item(input: &ItemInput) -> Result<ItemResult, CalcError> {
    let unit_price = require_positive(input.unit_price, "unit price")?;

    match input.mode {
        CalculationMode::Weight => {
            let quantity = require_positive(input.quantity, "quantity")?;
            Ok(build_result(quantity.to_f64().unwrap_or_default(), unit_price))
        }
        CalculationMode::Piece => {
            let unit_count = require_positive(input.unit_count, "unit count")?;
            if input.sub_products.is_empty() {
                return Err(CalcError::Validation(
                    "piece mode requires at least one sub-product".to_string(),
                ));
            }
            for sp in &input.sub_products {
                if !sp.per_unit_size.is_finite() || sp.per_unit_size < 0.0 {
                    return Err(CalcError::Validation(format!(
                        "sub-product '{}' has an invalid size",
                        sp.name
                    )));
                }
            }

            let total_size: Decimal = input
                .sub_products
                .iter()
                .map(|sp| to_decimal(sp.per_unit_size))
                .sum();
            if total_size.is_zero() {
                return Err(CalcError::Derivation(
                    "cannot derive quantity: all sub-product sizes are zero".to_string(),
                ));
            }

            // Whole-number quantity, half-away-from-zero
            let quantity = (unit_count * total_size)
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

            Ok(build_result(quantity.to_f64().unwrap_or_default(), unit_price))
        }
    }
}

fn require_positive(value: Option<f64>, field: &str) -> Result<Decimal, CalcError> {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => Ok(to_decimal(v)),
        Some(_) => Err(CalcError::Validation(format!(
            "{field} must be greater than zero"
        ))),
        None => Err(CalcError::Validation(format!("{field} is required"))),
    }
}

fn build_result(quantity: f64, unit_price: Decimal) -> ItemResult {
    let line_total = to_decimal(quantity) * unit_price;
    ItemResult {
        quantity,
        unit_price: to_f64(unit_price),
        line_total: to_f64(line_total),
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    fn weight(quantity: f64, unit_price: f64) -> ItemInput {
        ItemInput {
            mode: CalculationMode::Weight,
            quantity: Some(quantity),
            unit_count: None,
            unit_price: Some(unit_price),
            sub_products: vec![],
        }
    }

    fn piece(unit_count: f64, unit_price: f64, sizes: &[f64]) -> ItemInput {
        ItemInput {
            mode: CalculationMode::Piece,
            quantity: None,
            unit_count: Some(unit_count),
            unit_price: Some(unit_price),
            sub_products: sizes
                .iter()
                .enumerate()
                .map(|(i, s)| SubProductInput {
                    name: format!("sub_{i}"),
                    per_unit_size: *s,
                    unit_price: 0.0,
                })
                .collect(),
        }
    }

    #[test]
    fn test_weight_mode() {
        let result = calculate_item(&weight(450.0, 80.0)).unwrap();
        assert_eq!(result.quantity, 450.0);
        assert_eq!(result.line_total, 36000.00);
    }

    #[test]
    fn test_weight_mode_rounds_total() {
        let result = calculate_item(&weight(3.333, 10.0)).unwrap();
        assert_eq!(result.line_total, 33.33);
    }

    #[test]
    fn test_weight_mode_rejects_missing_quantity() {
        let input = ItemInput {
            quantity: None,
            ..weight(1.0, 80.0)
        };
        assert!(matches!(
            calculate_item(&input),
            Err(CalcError::Validation(_))
        ));
    }

    #[test]
    fn test_weight_mode_rejects_zero_price() {
        assert!(matches!(
            calculate_item(&weight(450.0, 0.0)),
            Err(CalcError::Validation(_))
        ));
    }

    #[test]
    fn test_piece_mode_derives_quantity() {
        // 10 units, sizes 8 + 12 per unit, price 130
        let result = calculate_item(&piece(10.0, 130.0, &[8.0, 12.0])).unwrap();
        assert_eq!(result.quantity, 200.0);
        assert_eq!(result.line_total, 26000.00);
    }

    #[test]
    fn test_piece_mode_rounds_derived_quantity() {
        let result = calculate_item(&piece(3.0, 10.0, &[1.25])).unwrap();
        // 3 * 1.25 = 3.75 -> 4
        assert_eq!(result.quantity, 4.0);
        assert_eq!(result.line_total, 40.00);
    }

    #[test]
    fn test_piece_mode_requires_sub_products() {
        assert!(matches!(
            calculate_item(&piece(10.0, 130.0, &[])),
            Err(CalcError::Validation(_))
        ));
    }

    #[test]
    fn test_piece_mode_all_zero_sizes_is_derivation_error() {
        assert!(matches!(
            calculate_item(&piece(10.0, 130.0, &[0.0, 0.0])),
            Err(CalcError::Derivation(_))
        ));
    }

    #[test]
    fn test_piece_mode_rejects_negative_size() {
        assert!(matches!(
            calculate_item(&piece(10.0, 130.0, &[8.0, -1.0])),
            Err(CalcError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_nan_inputs() {
        assert!(matches!(
            calculate_item(&weight(f64::NAN, 80.0)),
            Err(CalcError::Validation(_))
        ));
    }
}
