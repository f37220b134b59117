//! Authentication middleware
//!
//! Axum middleware for JWT authentication plus the per-user ownership check.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::AppError;
use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;
use crate::security_log;

/// Auth middleware, requires a logged-in user
///
/// Extracts and validates the JWT from `Authorization: Bearer <token>`.
/// On success the [`CurrentUser`] is injected into request extensions.
///
/// # Paths that skip authentication
///
/// - `OPTIONS *` (CORS preflight)
/// - anything outside `/api/`
/// - `/api/auth/signup` and `/api/auth/login`
/// - `/api/health`
///
/// # Errors
///
/// | Error | HTTP status |
/// |-------|-------------|
/// | Missing Authorization header | 401 Unauthorized |
/// | Expired token | 401 TokenExpired |
/// | Invalid token | 401 InvalidToken |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    // CORS preflight requests skip auth
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // Non-API routes skip auth (they 404 normally)
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    let is_public_api_route =
        path == "/api/auth/signup" || path == "/api/auth/login" || path == "/api/health";
    if is_public_api_route {
        return Ok(next.run(req).await);
    }

    let jwt_service = state.get_jwt_service();
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
            return Err(AppError::unauthorized());
        }
    };

    match jwt_service.validate_token(token) {
        Ok(claims) => {
            let user = CurrentUser::from(claims);
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = format!("{e}"),
                uri = format!("{:?}", req.uri())
            );

            match e {
                crate::auth::JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token("Invalid token")),
            }
        }
    }
}

/// Ownership check for per-user resources
///
/// Every bill, product, customer and expense belongs to exactly one user.
/// Handlers call this after loading a record to reject access by anyone
/// other than its owner.
///
/// `owner` is the record's user id in `table:id` form, as stored by the
/// repositories.
///
/// # Errors
///
/// Returns 403 Forbidden when the record belongs to a different user.
pub fn require_ownership(user: &CurrentUser, owner: &str) -> Result<(), AppError> {
    if user.id != owner {
        security_log!(
            "WARN",
            "ownership_denied",
            user_id = user.id.clone(),
            owner = owner.to_string()
        );
        return Err(AppError::forbidden(
            "You do not have access to this resource",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> CurrentUser {
        CurrentUser {
            id: "user:abc".to_string(),
            email: "ravi@example.com".to_string(),
            name: "Ravi".to_string(),
            business_name: "Ravi Traders".to_string(),
        }
    }

    #[test]
    fn test_ownership_allows_owner() {
        assert!(require_ownership(&user(), "user:abc").is_ok());
    }

    #[test]
    fn test_ownership_rejects_other_user() {
        let err = require_ownership(&user(), "user:xyz").unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }
}
