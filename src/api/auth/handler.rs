//! Auth API Handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{User, UserCreate};
use crate::db::repository::UserRepository;
use crate::security_log;
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_PASSWORD_LEN, MIN_PASSWORD_LEN, validate_required_text,
};
use crate::utils::{AppError, AppResult};

/// Fixed delay on login attempts, flattens timing differences between
/// unknown-email and wrong-password failures
const LOGIN_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

fn user_id_string(user: &User) -> String {
    user.id.as_ref().map(|id| id.to_string()).unwrap_or_default()
}

fn issue_token(state: &ServerState, user: &User) -> AppResult<String> {
    state
        .get_jwt_service()
        .generate_token(
            &user_id_string(user),
            &user.email,
            &user.name,
            &user.business_name,
        )
        .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))
}

/// POST /api/auth/signup - create an account and log in
pub async fn signup(
    State(state): State<ServerState>,
    Json(payload): Json<UserCreate>,
) -> AppResult<Json<AuthResponse>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.email, "email", MAX_EMAIL_LEN)?;
    validate_required_text(&payload.business_name, "business name", MAX_NAME_LEN)?;
    if !payload.email.contains('@') {
        return Err(AppError::validation("email is not valid"));
    }
    if payload.password.len() < MIN_PASSWORD_LEN || payload.password.len() > MAX_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "password must be between {MIN_PASSWORD_LEN} and {MAX_PASSWORD_LEN} characters"
        )));
    }

    let repo = UserRepository::new(state.get_db());
    let user = repo.create(payload).await?;

    security_log!("INFO", "signup", email = user.email.clone());

    let token = issue_token(&state, &user)?;
    Ok(Json(AuthResponse { token, user }))
}

/// POST /api/auth/login - authenticate and issue a token
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    tokio::time::sleep(LOGIN_DELAY).await;

    let repo = UserRepository::new(state.get_db());
    let user = match repo.find_by_email(&payload.email).await? {
        Some(user) => user,
        None => {
            security_log!("WARN", "login_failed", email = payload.email.clone());
            return Err(AppError::invalid_credentials());
        }
    };

    let verified = user
        .verify_password(&payload.password)
        .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;
    if !verified {
        security_log!("WARN", "login_failed", email = payload.email.clone());
        return Err(AppError::invalid_credentials());
    }

    security_log!("INFO", "login", email = user.email.clone());

    let token = issue_token(&state, &user)?;
    Ok(Json(AuthResponse { token, user }))
}

/// GET /api/auth/me - current account details
pub async fn me(
    State(state): State<ServerState>,
    current: CurrentUser,
) -> AppResult<Json<User>> {
    let repo = UserRepository::new(state.get_db());
    let user = repo
        .find_by_id(&current.id)
        .await?
        .ok_or_else(|| AppError::not_found("User account"))?;
    Ok(Json(user))
}
