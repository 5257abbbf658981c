//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod requests;
pub mod user;
pub mod views;

pub use requests::{
    claim_request, get_actions, get_badge, get_github_request, get_request, list_requests,
    lookup_request, toggle_watch,
};
pub use user::user_requests;
