//! Business profile API Handlers

use axum::{Json, extract::State};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::User;
use crate::db::repository::UserRepository;
use crate::utils::validation::{MAX_NAME_LEN, validate_optional_text};
use crate::utils::{AppError, AppResult};

/// Largest accepted logo payload (data URL), roughly a 1.5 MB image
const MAX_LOGO_LEN: usize = 2 * 1024 * 1024;

#[derive(Debug, Deserialize)]
pub struct BusinessInfoUpdate {
    pub name: Option<String>,
    pub business_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LogoUpdate {
    /// Logo image as a data URL, empty string clears it
    pub logo: String,
}

/// PUT /api/business/info - update owner and business names
pub async fn update_info(
    State(state): State<ServerState>,
    current: CurrentUser,
    Json(payload): Json<BusinessInfoUpdate>,
) -> AppResult<Json<User>> {
    validate_optional_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.business_name, "business name", MAX_NAME_LEN)?;
    if let Some(ref name) = payload.name
        && name.trim().is_empty()
    {
        return Err(AppError::validation("name must not be empty"));
    }
    if let Some(ref business_name) = payload.business_name
        && business_name.trim().is_empty()
    {
        return Err(AppError::validation("business name must not be empty"));
    }

    let repo = UserRepository::new(state.get_db());
    let user = repo
        .update_business_info(&current.id, payload.name, payload.business_name)
        .await?;
    Ok(Json(user))
}

/// PUT /api/business/logo - replace the business logo
pub async fn update_logo(
    State(state): State<ServerState>,
    current: CurrentUser,
    Json(payload): Json<LogoUpdate>,
) -> AppResult<Json<User>> {
    if payload.logo.len() > MAX_LOGO_LEN {
        return Err(AppError::validation("logo image is too large"));
    }
    if !payload.logo.is_empty() && !payload.logo.starts_with("data:image/") {
        return Err(AppError::validation("logo must be an image data URL"));
    }

    let repo = UserRepository::new(state.get_db());
    let user = repo.update_logo(&current.id, payload.logo).await?;
    Ok(Json(user))
}
