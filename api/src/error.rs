//! Unified error types for the FundRequest API
//!
//! This module defines error types for each layer:
//! - `DomainError`: Core business logic errors
//! - `FiatError`: Fiat price lookup errors
//! - `GithubError`: GitHub API client errors
//! - `AppError`: Application layer errors (wraps the others for HTTP responses)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Domain layer errors - pure business logic errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Fiat price lookup errors
#[derive(Debug, Error)]
pub enum FiatError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("No USD price for token {0}")]
    UnknownToken(String),

    #[error("USD value of {0} funds out of range")]
    OutOfRange(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

/// GitHub API client errors
#[derive(Debug, Error)]
pub enum GithubError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Issue not found: {owner}/{repo}#{number}")]
    IssueNotFound {
        owner: String,
        repo: String,
        number: i64,
    },

    #[error("Rate limited")]
    RateLimited,

    #[error("Unauthorized - invalid token")]
    Unauthorized,

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Fiat error: {0}")]
    Fiat(#[from] FiatError),

    #[error("GitHub error: {0}")]
    Github(#[from] GithubError),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Domain(DomainError::NotFound(msg)) => {
                (StatusCode::NOT_FOUND, "Not found", Some(msg.clone()))
            }
            AppError::Domain(DomainError::Validation(msg)) => (
                StatusCode::BAD_REQUEST,
                "Validation error",
                Some(msg.clone()),
            ),
            AppError::Fiat(e) => {
                tracing::error!("Fiat error: {}", e);
                match e {
                    FiatError::UnknownToken(symbol) => (
                        StatusCode::BAD_GATEWAY,
                        "Price service error",
                        Some(format!("No USD price for {}", symbol)),
                    ),
                    _ => (StatusCode::BAD_GATEWAY, "Price service error", None),
                }
            }
            AppError::Github(e) => {
                tracing::error!("GitHub error: {}", e);
                match e {
                    GithubError::IssueNotFound { .. } => {
                        (StatusCode::NOT_FOUND, "GitHub issue not found", None)
                    }
                    GithubError::RateLimited => {
                        (StatusCode::TOO_MANY_REQUESTS, "Rate limited", None)
                    }
                    _ => (StatusCode::BAD_GATEWAY, "GitHub service error", None),
                }
            }
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized", None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "Not found", Some(msg.clone())),
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            details,
        });

        (status, body).into_response()
    }
}
