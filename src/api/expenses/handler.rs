//! Expense API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::auth::{CurrentUser, require_ownership};
use crate::core::ServerState;
use crate::db::models::{Expense, ExpenseCreate, ExpenseUpdate, UserId};
use crate::db::repository::{ExpenseFilter, ExpenseRepository, ExpenseStats, parse_record_id};
use crate::utils::validation::{
    MAX_NOTE_LEN, validate_non_negative, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult};

fn owner_id(current: &CurrentUser) -> AppResult<UserId> {
    parse_record_id("user", &current.id).map_err(AppError::from)
}

/// GET /api/expenses?start_date=&end_date=&expense_type= - list with optional filters
pub async fn list(
    State(state): State<ServerState>,
    current: CurrentUser,
    Query(filter): Query<ExpenseFilter>,
) -> AppResult<Json<Vec<Expense>>> {
    let repo = ExpenseRepository::new(state.get_db());
    let expenses = repo
        .find_all_for_user(&owner_id(&current)?, &filter)
        .await?;
    Ok(Json(expenses))
}

/// GET /api/expenses/stats - totals per category for the filter window
pub async fn stats(
    State(state): State<ServerState>,
    current: CurrentUser,
    Query(filter): Query<ExpenseFilter>,
) -> AppResult<Json<ExpenseStats>> {
    let repo = ExpenseRepository::new(state.get_db());
    let stats = repo.stats_for_user(&owner_id(&current)?, &filter).await?;
    Ok(Json(stats))
}

/// GET /api/expenses/:id - fetch one expense
pub async fn get_by_id(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Expense>> {
    let repo = ExpenseRepository::new(state.get_db());
    let expense = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Expense {id}")))?;
    require_ownership(&current, &expense.user.to_string())?;
    Ok(Json(expense))
}

/// POST /api/expenses - record an expense
pub async fn create(
    State(state): State<ServerState>,
    current: CurrentUser,
    Json(payload): Json<ExpenseCreate>,
) -> AppResult<Json<Expense>> {
    validate_required_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_non_negative(payload.amount, "amount")?;
    if payload.notes.len() > MAX_NOTE_LEN {
        return Err(AppError::validation("notes are too long"));
    }

    let repo = ExpenseRepository::new(state.get_db());
    let expense = repo.create(&owner_id(&current)?, payload).await?;
    Ok(Json(expense))
}

/// PUT /api/expenses/:id - update an expense
pub async fn update(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<ExpenseUpdate>,
) -> AppResult<Json<Expense>> {
    if let Some(ref description) = payload.description {
        validate_required_text(description, "description", MAX_NOTE_LEN)?;
    }
    if let Some(amount) = payload.amount {
        validate_non_negative(amount, "amount")?;
    }
    validate_optional_text(&payload.notes, "notes", MAX_NOTE_LEN)?;

    let repo = ExpenseRepository::new(state.get_db());
    let existing = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Expense {id}")))?;
    require_ownership(&current, &existing.user.to_string())?;

    let expense = repo.update(&id, payload).await?;
    Ok(Json(expense))
}

/// DELETE /api/expenses/:id - delete an expense
pub async fn delete(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = ExpenseRepository::new(state.get_db());
    let existing = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Expense {id}")))?;
    require_ownership(&current, &existing.user.to_string())?;

    let deleted = repo.delete(&id).await?;
    Ok(Json(deleted))
}
