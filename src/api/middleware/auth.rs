use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::auth::jwt::{verify_token, Claims};

fn claims_from_parts(parts: &Parts) -> Result<Claims, ApiError> {
    let auth_header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::unauthorized("Missing authorization header"))?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        ApiError::unauthorized("Invalid authorization format. Use: Bearer <token>")
    })?;

    let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| "dev-secret-key".to_string());

    verify_token(token, &secret).map_err(|e| ApiError::unauthorized(format!("Invalid token: {}", e)))
}

/// JWT authentication extractor for protected routes; yields the caller's
/// user id.
pub struct JwtAuth(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for JwtAuth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let claims = claims_from_parts(parts)?;
        Ok(JwtAuth(claims.sub))
    }
}

/// Extractor for admin-only routes: a valid token whose admin claim is set.
pub struct AdminAuth(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for AdminAuth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let claims = claims_from_parts(parts)?;
        if !claims.admin {
            return Err(ApiError::forbidden("Admin access required"));
        }
        Ok(AdminAuth(claims.sub))
    }
}
