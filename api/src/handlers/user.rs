//! User handlers
//!
//! Pages scoped to the authenticated user.

use axum::{extract::State, Extension, Json};
use serde::Serialize;

use super::views::RequestView;
use crate::domain::entities::{PendingFund, UserProfile};
use crate::error::AppError;
use crate::AppState;

/// The user's own requests page
#[derive(Debug, Serialize)]
pub struct UserRequestsResponse {
    /// Requests the user watches
    pub requests: Vec<RequestView>,
    pub projects: Vec<String>,
    pub pending_funds: Vec<PendingFund>,
    pub is_authenticated: bool,
}

/// GET /user/requests
pub async fn user_requests(
    State(state): State<AppState>,
    Extension(user): Extension<UserProfile>,
) -> Result<Json<UserRequestsResponse>, AppError> {
    let requests = state.request_service.find_requests_for_user(&user).await?;
    let views = requests
        .iter()
        .map(|r| RequestView::for_user(r, Some(&user)))
        .collect();

    Ok(Json(UserRequestsResponse {
        requests: views,
        projects: state.request_service.find_all_projects().await?,
        pending_funds: state.fund_service.pending_funds_for_user(&user).await?,
        is_authenticated: true,
    }))
}
