//! API key identification of FundRequest users
//!
//! Callers send `Authorization: Bearer <api key>`. Only the SHA-256 of a key
//! is stored on the profile, so lookups go through `hash_api_key`.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request},
    middleware::Next,
    response::Response,
};

use crate::app::hash_api_key;
use crate::domain::entities::UserProfile;
use crate::error::AppError;
use crate::AppState;

/// API key from a bearer Authorization header; the scheme is case-insensitive
fn bearer_api_key(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, key) = value.split_once(' ')?;
    let key = key.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !key.is_empty()).then_some(key)
}

async fn identify(state: &AppState, api_key: &str) -> Result<Option<UserProfile>, AppError> {
    let user = state
        .profile_service
        .find_by_api_key(&hash_api_key(api_key))
        .await?;
    if user.is_none() {
        tracing::debug!("Unknown API key presented");
    }
    Ok(user)
}

/// Require a known user
///
/// Puts the caller's `UserProfile` into the request extensions, 401 otherwise.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let api_key = bearer_api_key(request.headers()).ok_or(AppError::Unauthorized)?;
    let user = identify(&state, api_key)
        .await?
        .ok_or(AppError::Unauthorized)?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Identify the user when possible; anonymous callers pass through.
pub async fn optional_auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let user = match bearer_api_key(request.headers()) {
        Some(api_key) => identify(&state, api_key).await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to look up API key");
            None
        }),
        None => None,
    };
    if let Some(user) = user {
        request.extensions_mut().insert(user);
    }

    next.run(request).await
}
