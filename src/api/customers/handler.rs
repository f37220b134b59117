//! Customer API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::auth::{CurrentUser, require_ownership};
use crate::core::ServerState;
use crate::db::models::{Customer, CustomerCreate, CustomerUpdate, UserId};
use crate::db::repository::{CustomerRepository, parse_record_id};
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, validate_mobile, validate_required_text,
};
use crate::utils::{AppError, AppResult};

fn owner_id(current: &CurrentUser) -> AppResult<UserId> {
    parse_record_id("user", &current.id).map_err(AppError::from)
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Name fragment, case-insensitive
    pub query: String,
}

/// GET /api/customers - list the caller's customers
pub async fn list(
    State(state): State<ServerState>,
    current: CurrentUser,
) -> AppResult<Json<Vec<Customer>>> {
    let repo = CustomerRepository::new(state.get_db());
    let customers = repo.find_all_for_user(&owner_id(&current)?).await?;
    Ok(Json(customers))
}

/// GET /api/customers/search?query= - typeahead name search
pub async fn search(
    State(state): State<ServerState>,
    current: CurrentUser,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<Customer>>> {
    let repo = CustomerRepository::new(state.get_db());
    let customers = repo.search(&owner_id(&current)?, &params.query).await?;
    Ok(Json(customers))
}

/// GET /api/customers/:id - fetch one customer
pub async fn get_by_id(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Customer>> {
    let repo = CustomerRepository::new(state.get_db());
    let customer = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Customer {id}")))?;
    require_ownership(&current, &customer.user.to_string())?;
    Ok(Json(customer))
}

/// POST /api/customers - create a customer
pub async fn create(
    State(state): State<ServerState>,
    current: CurrentUser,
    Json(payload): Json<CustomerCreate>,
) -> AppResult<Json<Customer>> {
    validate_required_text(&payload.name, "customer name", MAX_NAME_LEN)?;
    validate_mobile(payload.mobile.trim(), "mobile")?;
    if payload.address.len() > MAX_ADDRESS_LEN {
        return Err(AppError::validation("address is too long"));
    }

    let repo = CustomerRepository::new(state.get_db());
    let customer = repo.create(&owner_id(&current)?, payload).await?;
    Ok(Json(customer))
}

/// PUT /api/customers/:id - update a customer
pub async fn update(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<CustomerUpdate>,
) -> AppResult<Json<Customer>> {
    if let Some(ref name) = payload.name {
        validate_required_text(name, "customer name", MAX_NAME_LEN)?;
    }
    if let Some(ref mobile) = payload.mobile {
        validate_mobile(mobile.trim(), "mobile")?;
    }
    if let Some(ref address) = payload.address
        && address.len() > MAX_ADDRESS_LEN
    {
        return Err(AppError::validation("address is too long"));
    }

    let repo = CustomerRepository::new(state.get_db());
    let existing = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Customer {id}")))?;
    require_ownership(&current, &existing.user.to_string())?;

    let customer = repo.update(&id, payload).await?;
    Ok(Json(customer))
}

/// DELETE /api/customers/:id - delete a customer
pub async fn delete(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = CustomerRepository::new(state.get_db());
    let existing = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Customer {id}")))?;
    require_ownership(&current, &existing.user.to_string())?;

    let deleted = repo.delete(&id).await?;
    Ok(Json(deleted))
}
