//! Bill API Handlers
//!
//! Totals are always server-computed. Clients send raw entry data (mode,
//! quantities, prices, charges) and the engine derives line totals and
//! aggregates; totals in a request body are ignored.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::auth::{CurrentUser, require_ownership};
use crate::billing::{
    CalculationMode, ItemInput, ItemResult, RoundOff, calculate_bill_totals, number_to_words,
};
use crate::core::ServerState;
use crate::db::models::{Bill, BillCreate, BillUpdate, LineItem, LineItemInput, UserId};
use crate::db::repository::{BillRepository, UserRepository, parse_record_id};
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, validate_mobile, validate_required_text,
};
use crate::utils::{AppError, AppResult};

fn owner_id(current: &CurrentUser) -> AppResult<UserId> {
    parse_record_id("user", &current.id).map_err(AppError::from)
}

/// Calculate and label every line of a bill
fn build_line_items(inputs: &[LineItemInput]) -> AppResult<Vec<LineItem>> {
    if inputs.is_empty() {
        return Err(AppError::validation("a bill needs at least one item"));
    }

    inputs
        .iter()
        .map(|input| {
            validate_required_text(&input.main_product, "product name", MAX_NAME_LEN)?;
            let result = crate::billing::calculate_item(&input.calc)?;

            let per_unit_size = match input.calc.mode {
                CalculationMode::Piece => Some(
                    input
                        .calc
                        .sub_products
                        .iter()
                        .map(|sp| sp.per_unit_size)
                        .sum(),
                ),
                CalculationMode::Weight => None,
            };

            Ok(LineItem {
                main_product: input.main_product.trim().to_string(),
                sub_products: input
                    .calc
                    .sub_products
                    .iter()
                    .map(|sp| sp.name.clone())
                    .collect(),
                calculation_mode: input.calc.mode,
                unit_count: match input.calc.mode {
                    CalculationMode::Piece => input.calc.unit_count,
                    CalculationMode::Weight => None,
                },
                per_unit_size,
                quantity: result.quantity,
                unit_price: result.unit_price,
                line_total: result.line_total,
            })
        })
        .collect()
}

/// Assemble a full bill from calculated items and charges
fn assemble_bill(
    user: UserId,
    customer_name: String,
    customer_mobile: String,
    ship_to_address: String,
    items: Vec<LineItem>,
    loading_charge: Option<f64>,
    transport_charge: Option<f64>,
    round_off: RoundOff,
) -> AppResult<Bill> {
    validate_mobile(customer_mobile.trim(), "customer mobile")?;
    if ship_to_address.len() > MAX_ADDRESS_LEN {
        return Err(AppError::validation("ship-to address is too long"));
    }

    let line_totals: Vec<f64> = items.iter().map(|i| i.line_total).collect();
    let totals = calculate_bill_totals(&line_totals, loading_charge, transport_charge, round_off);

    Ok(Bill {
        id: None,
        user,
        bill_number: String::new(), // assigned by the repository
        customer_name: customer_name.trim().to_string(),
        customer_mobile: customer_mobile.trim().to_string(),
        ship_to_address: ship_to_address.trim().to_string(),
        items,
        subtotal: totals.subtotal,
        loading_charge: totals.loading_charge,
        transport_charge: totals.transport_charge,
        round_off: totals.round_off,
        grand_total: totals.grand_total,
        created_at: 0, // assigned by the repository
    })
}

/// GET /api/bills - list the caller's bills, newest first
pub async fn list(
    State(state): State<ServerState>,
    current: CurrentUser,
) -> AppResult<Json<Vec<Bill>>> {
    let repo = BillRepository::new(state.get_db());
    let bills = repo.find_all_for_user(&owner_id(&current)?).await?;
    Ok(Json(bills))
}

/// GET /api/bills/:id - fetch one bill
pub async fn get_by_id(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Bill>> {
    let repo = BillRepository::new(state.get_db());
    let bill = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Bill {id}")))?;
    require_ownership(&current, &bill.user.to_string())?;
    Ok(Json(bill))
}

/// POST /api/bills - calculate and persist a new bill
pub async fn create(
    State(state): State<ServerState>,
    current: CurrentUser,
    Json(payload): Json<BillCreate>,
) -> AppResult<Json<Bill>> {
    let items = build_line_items(&payload.items)?;
    let bill = assemble_bill(
        owner_id(&current)?,
        payload.customer_name,
        payload.customer_mobile,
        payload.ship_to_address,
        items,
        payload.loading_charge,
        payload.transport_charge,
        payload.round_off,
    )?;

    let repo = BillRepository::new(state.get_db());
    let bill = repo.create(bill).await?;
    Ok(Json(bill))
}

/// PUT /api/bills/:id - update a bill, recalculating totals
///
/// Absent fields keep their stored values; absent round_off reverts to
/// automatic rounding.
pub async fn update(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<BillUpdate>,
) -> AppResult<Json<Bill>> {
    let repo = BillRepository::new(state.get_db());
    let existing = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Bill {id}")))?;
    require_ownership(&current, &existing.user.to_string())?;

    let items = match payload.items {
        Some(ref inputs) => build_line_items(inputs)?,
        None => existing.items.clone(),
    };

    let bill = assemble_bill(
        existing.user.clone(),
        payload.customer_name.unwrap_or(existing.customer_name),
        payload.customer_mobile.unwrap_or(existing.customer_mobile),
        payload.ship_to_address.unwrap_or(existing.ship_to_address),
        items,
        payload.loading_charge.or(Some(existing.loading_charge)),
        payload
            .transport_charge
            .or(Some(existing.transport_charge)),
        payload.round_off.unwrap_or_default(),
    )?;

    let bill = repo.update(&id, bill).await?;
    Ok(Json(bill))
}

/// DELETE /api/bills/:id - delete a bill
pub async fn delete(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = BillRepository::new(state.get_db());
    let existing = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Bill {id}")))?;
    require_ownership(&current, &existing.user.to_string())?;

    let deleted = repo.delete(&id).await?;
    Ok(Json(deleted))
}

/// POST /api/bills/calculate-item - preview one line without saving
///
/// Used by bill entry screens to show derived quantities and totals as
/// the user types.
pub async fn calculate_item(
    _current: CurrentUser,
    Json(payload): Json<ItemInput>,
) -> AppResult<Json<ItemResult>> {
    let result = crate::billing::calculate_item(&payload)?;
    Ok(Json(result))
}

/// Everything a client needs to render a printable bill
#[derive(Debug, Serialize)]
pub struct BillPrintView {
    pub business_name: String,
    pub owner_name: String,
    pub business_logo: String,
    pub bill: Bill,
    /// Grand total in words, e.g. "One Thousand Two Hundred Rupees Only"
    pub amount_in_words: String,
}

/// GET /api/bills/:id/print - print view with amount in words
pub async fn print_view(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<BillPrintView>> {
    let repo = BillRepository::new(state.get_db());
    let bill = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Bill {id}")))?;
    require_ownership(&current, &bill.user.to_string())?;

    let user_repo = UserRepository::new(state.get_db());
    let user = user_repo
        .find_by_id(&current.id)
        .await?
        .ok_or_else(|| AppError::not_found("User account"))?;

    let rupees = bill.grand_total.round().max(0.0) as u64;
    let amount_in_words = format!("{} Rupees Only", number_to_words(rupees));

    Ok(Json(BillPrintView {
        business_name: user.business_name,
        owner_name: user.name,
        business_logo: user.business_logo,
        bill,
        amount_in_words,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::billing::SubProductInput;

    fn weight_input(name: &str, quantity: f64, unit_price: f64) -> LineItemInput {
        LineItemInput {
            main_product: name.to_string(),
            calc: ItemInput {
                mode: CalculationMode::Weight,
                quantity: Some(quantity),
                unit_count: None,
                unit_price: Some(unit_price),
                sub_products: vec![],
            },
        }
    }

    #[test]
    fn test_build_line_items_weight() {
        let items = build_line_items(&[weight_input("Steel Sheet", 450.0, 80.0)]).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].line_total, 36000.00);
        assert_eq!(items[0].unit_count, None);
        assert_eq!(items[0].per_unit_size, None);
    }

    #[test]
    fn test_build_line_items_piece_labels() {
        let input = LineItemInput {
            main_product: "Pipe Bundle".to_string(),
            calc: ItemInput {
                mode: CalculationMode::Piece,
                quantity: None,
                unit_count: Some(10.0),
                unit_price: Some(130.0),
                sub_products: vec![
                    SubProductInput {
                        name: "8ft".to_string(),
                        per_unit_size: 8.0,
                        unit_price: 0.0,
                    },
                    SubProductInput {
                        name: "12ft".to_string(),
                        per_unit_size: 12.0,
                        unit_price: 0.0,
                    },
                ],
            },
        };

        let items = build_line_items(std::slice::from_ref(&input)).unwrap();
        assert_eq!(items[0].sub_products, vec!["8ft", "12ft"]);
        assert_eq!(items[0].per_unit_size, Some(20.0));
        assert_eq!(items[0].quantity, 200.0);
        assert_eq!(items[0].line_total, 26000.00);
    }

    #[test]
    fn test_build_line_items_rejects_empty() {
        assert!(build_line_items(&[]).is_err());
    }

    #[test]
    fn test_assemble_bill_totals() {
        let items = build_line_items(&[weight_input("Steel Sheet", 10.0, 125.037)]).unwrap();
        let bill = assemble_bill(
            "user:abc".parse().unwrap(),
            "Sharma Traders".to_string(),
            "9876543210".to_string(),
            String::new(),
            items,
            Some(50.0),
            Some(25.0),
            RoundOff::Auto,
        )
        .unwrap();

        assert_eq!(bill.subtotal, 1250.37);
        assert_eq!(bill.grand_total, 1325.0);
        assert_eq!(bill.round_off, -0.37);
    }

    #[test]
    fn test_assemble_bill_rejects_bad_mobile() {
        let items = build_line_items(&[weight_input("Steel Sheet", 1.0, 1.0)]).unwrap();
        let result = assemble_bill(
            "user:abc".parse().unwrap(),
            String::new(),
            "not-a-number".to_string(),
            String::new(),
            items,
            None,
            None,
            RoundOff::Auto,
        );
        assert!(result.is_err());
    }
}
