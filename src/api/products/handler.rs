//! Product API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::{CurrentUser, require_ownership};
use crate::billing::CalculationMode;
use crate::core::ServerState;
use crate::db::models::{Product, ProductCreate, ProductUpdate, UserId};
use crate::db::repository::{ProductRepository, parse_record_id};
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};

fn owner_id(current: &CurrentUser) -> AppResult<UserId> {
    parse_record_id("user", &current.id).map_err(AppError::from)
}

fn validate_payload(
    main_product: &str,
    mode: CalculationMode,
    sub_products: &[crate::db::models::SubProduct],
) -> AppResult<()> {
    validate_required_text(main_product, "product name", MAX_NAME_LEN)?;
    for sp in sub_products {
        validate_required_text(&sp.name, "sub-product name", MAX_NAME_LEN)?;
        if !sp.size.is_finite() || sp.size < 0.0 {
            return Err(AppError::validation(format!(
                "sub-product '{}' has an invalid size",
                sp.name
            )));
        }
        if !sp.price.is_finite() || sp.price < 0.0 {
            return Err(AppError::validation(format!(
                "sub-product '{}' has an invalid price",
                sp.name
            )));
        }
    }
    if mode == CalculationMode::Piece && sub_products.is_empty() {
        return Err(AppError::validation(
            "piece-mode products need at least one sub-product",
        ));
    }
    Ok(())
}

/// GET /api/products - list the caller's products
pub async fn list(
    State(state): State<ServerState>,
    current: CurrentUser,
) -> AppResult<Json<Vec<Product>>> {
    let repo = ProductRepository::new(state.get_db());
    let products = repo.find_all_for_user(&owner_id(&current)?).await?;
    Ok(Json(products))
}

/// GET /api/products/:id - fetch one product
pub async fn get_by_id(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    let repo = ProductRepository::new(state.get_db());
    let product = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {id}")))?;
    require_ownership(&current, &product.user.to_string())?;
    Ok(Json(product))
}

/// POST /api/products - create a product
pub async fn create(
    State(state): State<ServerState>,
    current: CurrentUser,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<Product>> {
    validate_payload(
        &payload.main_product,
        payload.calculation_mode,
        &payload.sub_products,
    )?;

    let repo = ProductRepository::new(state.get_db());
    let product = repo.create(&owner_id(&current)?, payload).await?;
    Ok(Json(product))
}

/// PUT /api/products/:id - update a product
pub async fn update(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<Product>> {
    let repo = ProductRepository::new(state.get_db());
    let existing = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {id}")))?;
    require_ownership(&current, &existing.user.to_string())?;

    let mode = payload.calculation_mode.unwrap_or(existing.calculation_mode);
    let name = payload
        .main_product
        .as_deref()
        .unwrap_or(&existing.main_product);
    let sub_products = payload
        .sub_products
        .as_deref()
        .unwrap_or(&existing.sub_products);
    validate_payload(name, mode, sub_products)?;

    let product = repo.update(&id, payload).await?;
    Ok(Json(product))
}

/// DELETE /api/products/:id - delete a product
pub async fn delete(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = ProductRepository::new(state.get_db());
    let existing = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {id}")))?;
    require_ownership(&current, &existing.user.to_string())?;

    let deleted = repo.delete(&id).await?;
    Ok(Json(deleted))
}
