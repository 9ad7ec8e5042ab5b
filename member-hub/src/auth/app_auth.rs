//! Application JWT authentication for the member API

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, Validation};
#[cfg(test)]
use jsonwebtoken::{EncodingKey, Header};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};

use crate::state::AppState;

/// JWT claims for application authentication
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppClaims {
    /// Operator / integration the token was issued to
    pub sub: String,
    /// Application whose members the token may manage
    pub app_id: String,
    /// Expiration (Unix timestamp seconds)
    pub exp: usize,
    /// Issued at (Unix timestamp seconds)
    pub iat: usize,
}

/// Authenticated identity extracted from the bearer token
#[derive(Debug, Clone)]
pub struct AppIdentity {
    pub subject: String,
    pub app_id: String,
}

impl AppIdentity {
    /// Reject requests addressed to another application
    pub fn verify_app(&self, app_id: &str) -> Result<(), AppError> {
        if self.app_id == app_id {
            Ok(())
        } else {
            Err(AppError::new(ErrorCode::AppMismatch).with_detail("app_id", app_id))
        }
    }
}

#[cfg(test)]
const JWT_EXPIRY_HOURS: i64 = 24;

/// Create a JWT token for an application
#[cfg(test)]
pub fn create_token(
    subject: &str,
    app_id: &str,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now();
    let claims = AppClaims {
        sub: subject.to_string(),
        app_id: app_id.to_string(),
        exp: (now + chrono::Duration::hours(JWT_EXPIRY_HOURS)).timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Token part of an `Authorization: Bearer <token>` header value
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_once(' ')?;
    let token = token.trim();
    if scheme != "Bearer" || token.is_empty() {
        return None;
    }
    Some(token)
}

/// Verify signature and expiry of an application token
pub fn verify_token(token: &str, secret: &str) -> Result<AppIdentity, AppError> {
    let token_data = jsonwebtoken::decode::<AppClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        tracing::debug!("JWT validation failed: {e}");
        match e.kind() {
            ErrorKind::ExpiredSignature => AppError::token_expired(),
            _ => AppError::invalid_token("Invalid token"),
        }
    })?;

    Ok(AppIdentity {
        subject: token_data.claims.sub,
        app_id: token_data.claims.app_id,
    })
}

/// Middleware that extracts and verifies the application JWT
pub async fn app_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let auth_header = request
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::unauthorized().into_response())?;

    let token = bearer_token(auth_header).ok_or_else(|| {
        AppError::with_message(ErrorCode::NotAuthenticated, "Invalid Authorization format")
            .into_response()
    })?;

    let identity =
        verify_token(token, &state.jwt_secret).map_err(IntoResponse::into_response)?;

    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}
