//! View models
//!
//! Maps domain requests onto the JSON shapes the request pages consume.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::{AllFunds, Platform, Request, RequestPhase, UserProfile};

/// A request as shown in lists
#[derive(Debug, Clone, Serialize)]
pub struct RequestView {
    pub id: i64,
    pub platform: Platform,
    pub platform_id: String,
    pub owner: String,
    pub repo: String,
    pub issue_number: i64,
    pub title: String,
    pub link: String,
    pub phase: RequestPhase,
    pub technologies: Vec<String>,
    pub funds: AllFunds,
    /// Whether the current user watches the request
    pub starred: bool,
    pub created_at: DateTime<Utc>,
}

impl RequestView {
    pub fn for_user(request: &Request, user: Option<&UserProfile>) -> Self {
        let issue = &request.issue_information;
        Self {
            id: request.id.0,
            platform: issue.platform,
            platform_id: issue.platform_id.clone(),
            owner: issue.owner.clone(),
            repo: issue.repo.clone(),
            issue_number: issue.number,
            title: issue.title.clone(),
            link: issue.link.clone(),
            phase: request.phase,
            technologies: request.technologies.clone(),
            funds: request.funds.clone(),
            starred: user.is_some_and(|u| request.is_watched_by(&u.email)),
            created_at: request.created_at,
        }
    }
}

/// A request as shown on its detail page
#[derive(Debug, Clone, Serialize)]
pub struct RequestDetailsView {
    #[serde(flatten)]
    pub request: RequestView,
    pub solver: Option<String>,
    /// Number of users watching; who they are is not exposed
    pub watcher_count: usize,
}

impl RequestDetailsView {
    pub fn for_user(request: &Request, user: Option<&UserProfile>) -> Self {
        Self {
            request: RequestView::for_user(request, user),
            solver: request.solver.clone(),
            watcher_count: request.watchers.len(),
        }
    }
}
