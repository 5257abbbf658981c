//! Request service
//!
//! Lookups and views over funding requests: overview lists, issue comments,
//! claim eligibility and watching.

use std::collections::BTreeSet;
use std::sync::Arc;

use rust_decimal::Decimal;

use crate::domain::entities::{
    Comment, Platform, Request, RequestId, RequestPhase, Statistics, UserClaimable, UserProfile,
};
use crate::domain::ports::{GithubClient, RequestRepository};
use crate::error::{AppError, DomainError};

/// Service for querying and watching requests
pub struct RequestService<RR, GC>
where
    RR: RequestRepository + ?Sized,
    GC: GithubClient + ?Sized,
{
    requests: Arc<RR>,
    github: Arc<GC>,
}

impl<RR, GC> RequestService<RR, GC>
where
    RR: RequestRepository + ?Sized,
    GC: GithubClient + ?Sized,
{
    pub fn new(requests: Arc<RR>, github: Arc<GC>) -> Self {
        Self { requests, github }
    }

    pub async fn find_all(&self) -> Result<Vec<Request>, AppError> {
        Ok(self.requests.find_all().await?)
    }

    /// Find a request by ID, failing with not found
    pub async fn find_request(&self, id: &RequestId) -> Result<Request, AppError> {
        self.requests
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Request {} not found", id)))
    }

    /// Find a request by its issue's platform id, failing with not found
    pub async fn find_request_by_platform(
        &self,
        platform: Platform,
        platform_id: &str,
    ) -> Result<Request, AppError> {
        self.requests
            .find_by_platform_id(platform, platform_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("No request for {} issue {}", platform, platform_id))
            })
    }

    /// Requests the user is watching
    pub async fn find_requests_for_user(
        &self,
        user: &UserProfile,
    ) -> Result<Vec<Request>, AppError> {
        Ok(self.requests.find_watched_by(&user.email).await?)
    }

    /// Distinct project owners, sorted
    pub async fn find_all_projects(&self) -> Result<Vec<String>, AppError> {
        let requests = self.requests.find_all().await?;
        let projects: BTreeSet<String> = requests
            .into_iter()
            .map(|r| r.issue_information.owner)
            .collect();
        Ok(projects.into_iter().collect())
    }

    /// Distinct technologies over all requests, sorted
    pub async fn find_all_technologies(&self) -> Result<Vec<String>, AppError> {
        let requests = self.requests.find_all().await?;
        let technologies: BTreeSet<String> = requests
            .into_iter()
            .flat_map(|r| r.technologies)
            .collect();
        Ok(technologies.into_iter().collect())
    }

    pub async fn statistics(&self) -> Result<Statistics, AppError> {
        let requests = self.requests.find_all().await?;
        let total_fnd_funded = requests
            .iter()
            .filter_map(|r| r.funds.fnd_funds.as_ref())
            .try_fold(Decimal::ZERO, |total, f| total.checked_add(f.total_amount))
            .ok_or_else(|| DomainError::Validation("Total FND funded overflows".to_string()))?;

        Ok(Statistics {
            number_of_requests: requests.len(),
            number_funded: requests.iter().filter(|r| r.funds.has_funds()).count(),
            total_fnd_funded,
        })
    }

    /// Comments on the issue behind a request
    pub async fn get_comments(&self, id: &RequestId) -> Result<Vec<Comment>, AppError> {
        let request = self.find_request(id).await?;
        let issue = &request.issue_information;
        match issue.platform {
            Platform::Github => {
                let comments = self
                    .github
                    .list_comments(&issue.owner, &issue.repo, issue.number)
                    .await?;
                Ok(comments
                    .into_iter()
                    .map(|c| Comment {
                        id: c.id,
                        user_name: c.user.login,
                        user_url: c.user.html_url,
                        body: c.body,
                        created_at: c.created_at,
                    })
                    .collect())
            }
        }
    }

    /// Whether a request can be claimed, and whether the given user is the solver
    pub async fn user_claimable(
        &self,
        user: Option<&UserProfile>,
        id: &RequestId,
    ) -> Result<UserClaimable, AppError> {
        let request = self.find_request(id).await?;
        Ok(claimable_for(&request, user))
    }

    /// Start or stop watching a request, returning the updated request
    pub async fn toggle_watch(
        &self,
        user: &UserProfile,
        id: &RequestId,
    ) -> Result<Request, AppError> {
        let (updated, watching) = self.requests.toggle_watcher(id, &user.email).await?;

        tracing::info!(
            request_id = %id,
            user = %user.email,
            watching,
            "Request watch toggled"
        );

        Ok(updated)
    }
}

fn claimable_for(request: &Request, user: Option<&UserProfile>) -> UserClaimable {
    let claimable = request.phase == RequestPhase::Claimable;
    let username = user.and_then(|u| u.github_username.as_deref());
    let is_solver = match (username, request.solver.as_deref()) {
        (Some(username), Some(solver)) => username.eq_ignore_ascii_case(solver),
        _ => false,
    };

    UserClaimable {
        claimable,
        claimable_by_logged_in_user: claimable && is_solver,
    }
}
