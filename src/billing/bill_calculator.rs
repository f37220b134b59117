//! Bill-Level Calculator
//!
//! Calculate bill aggregates with support for:
//! - Subtotal over line-item totals
//! - Loading and transport charges (leniently coerced)
//! - Automatic or manual round-off of the grand total
//!
//! Uses helpers from item_calculator for decimal conversion.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use super::item_calculator::{to_decimal, to_f64};

/// Round-off policy for the grand total
///
/// Auto rounds the pre-round total to the nearest whole rupee and records
/// the signed difference. Manual applies a caller-provided adjustment
/// as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "lowercase")]
pub enum RoundOff {
    Auto,
    Manual(f64),
}

impl Default for RoundOff {
    fn default() -> Self {
        Self::Auto
    }
}

/// Result of bill-level calculation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BillTotals {
    /// Sum of line totals, rounded to 2 places
    pub subtotal: f64,
    pub loading_charge: f64,
    pub transport_charge: f64,
    /// Signed round-off applied to reach the grand total
    pub round_off: f64,
    pub grand_total: f64,
}

/// Coerce a charge value into a usable amount
///
/// Missing, non-finite and negative charges all collapse to zero rather
/// than failing the bill. Charges arrive from free-form client fields and
/// a garbage charge should never block billing.
pub fn coerce_charge(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => 0.0,
    }
}

/// Calculate bill totals from line totals and charges
///
/// # Calculation Steps
/// 1. `subtotal = sum(line_totals)`, rounded to 2 places
/// 2. `pre_round = subtotal + loading_charge + transport_charge`
/// 3. Auto: `grand_total = round(pre_round)` to the nearest whole,
///    half-away-from-zero, and `round_off = grand_total - pre_round`.
///    Manual: `grand_total = pre_round + adjustment`.
pub fn calculate_bill_totals(
    line_totals: &[f64],
    loading_charge: Option<f64>,
    transport_charge: Option<f64>,
    round_off: RoundOff,
) -> BillTotals {
    let subtotal: Decimal = line_totals.iter().map(|t| to_decimal(*t)).sum();
    let loading = to_decimal(coerce_charge(loading_charge));
    let transport = to_decimal(coerce_charge(transport_charge));

    let pre_round = subtotal + loading + transport;

    let (round_off_amount, grand_total) = match round_off {
        RoundOff::Auto => {
            let rounded =
                pre_round.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
            (rounded - pre_round, rounded)
        }
        RoundOff::Manual(adjustment) => {
            let adj = to_decimal(adjustment);
            (adj, pre_round + adj)
        }
    };

    BillTotals {
        subtotal: to_f64(subtotal),
        loading_charge: to_f64(loading),
        transport_charge: to_f64(transport),
        round_off: to_f64(round_off_amount),
        grand_total: to_f64(grand_total),
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_round_off() {
        let totals =
            calculate_bill_totals(&[1250.37], Some(50.0), Some(25.0), RoundOff::Auto);
        assert_eq!(totals.subtotal, 1250.37);
        assert_eq!(totals.loading_charge, 50.0);
        assert_eq!(totals.transport_charge, 25.0);
        assert_eq!(totals.grand_total, 1325.0);
        assert_eq!(totals.round_off, -0.37);
    }

    #[test]
    fn test_auto_rounds_up_past_half() {
        let totals = calculate_bill_totals(&[100.50], None, None, RoundOff::Auto);
        assert_eq!(totals.grand_total, 101.0);
        assert_eq!(totals.round_off, 0.50);
    }

    #[test]
    fn test_manual_round_off() {
        let totals =
            calculate_bill_totals(&[1250.37], Some(50.0), Some(25.0), RoundOff::Manual(0.63));
        assert_eq!(totals.grand_total, 1326.00);
        assert_eq!(totals.round_off, 0.63);
    }

    #[test]
    fn test_auto_is_idempotent_on_whole_totals() {
        let totals = calculate_bill_totals(&[1325.0], None, None, RoundOff::Auto);
        assert_eq!(totals.grand_total, 1325.0);
        assert_eq!(totals.round_off, 0.0);
    }

    #[test]
    fn test_auto_round_off_magnitude_below_one() {
        for cents in 0..100 {
            let total = 500.0 + cents as f64 / 100.0;
            let totals = calculate_bill_totals(&[total], None, None, RoundOff::Auto);
            assert!(totals.round_off.abs() < 1.0, "round_off for {total}");
            assert_eq!(totals.grand_total.fract(), 0.0);
        }
    }

    #[test]
    fn test_charges_are_coerced() {
        assert_eq!(coerce_charge(None), 0.0);
        assert_eq!(coerce_charge(Some(f64::NAN)), 0.0);
        assert_eq!(coerce_charge(Some(-10.0)), 0.0);
        assert_eq!(coerce_charge(Some(25.0)), 25.0);

        let totals =
            calculate_bill_totals(&[100.0], Some(-10.0), Some(f64::NAN), RoundOff::Auto);
        assert_eq!(totals.loading_charge, 0.0);
        assert_eq!(totals.transport_charge, 0.0);
        assert_eq!(totals.grand_total, 100.0);
    }

    #[test]
    fn test_empty_bill() {
        let totals = calculate_bill_totals(&[], None, None, RoundOff::Auto);
        assert_eq!(totals.subtotal, 0.0);
        assert_eq!(totals.grand_total, 0.0);
        assert_eq!(totals.round_off, 0.0);
    }

    #[test]
    fn test_round_off_serde_format() {
        let auto = serde_json::to_value(RoundOff::Auto).unwrap();
        assert_eq!(auto, serde_json::json!({"mode": "auto"}));

        let manual = serde_json::to_value(RoundOff::Manual(0.63)).unwrap();
        assert_eq!(manual, serde_json::json!({"mode": "manual", "value": 0.63}));

        let parsed: RoundOff =
            serde_json::from_value(serde_json::json!({"mode": "manual", "value": -0.5})).unwrap();
        assert_eq!(parsed, RoundOff::Manual(-0.5));
    }
}
