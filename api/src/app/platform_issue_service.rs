//! Platform issue service
//!
//! Looks up the live state of the issue behind a request.

use std::sync::Arc;

use crate::domain::entities::{
    parse_github_platform_id, Platform, PlatformIssue, PlatformIssueStatus,
};
use crate::domain::ports::GithubClient;
use crate::error::{AppError, GithubError};

/// Service for platform issues
pub struct PlatformIssueService<GC>
where
    GC: GithubClient + ?Sized,
{
    github: Arc<GC>,
}

impl<GC> PlatformIssueService<GC>
where
    GC: GithubClient + ?Sized,
{
    pub fn new(github: Arc<GC>) -> Self {
        Self { github }
    }

    /// The issue with the given platform id, `None` if the platform does not know it
    pub async fn find_by(
        &self,
        platform: Platform,
        platform_id: &str,
    ) -> Result<Option<PlatformIssue>, AppError> {
        match platform {
            Platform::Github => {
                let (owner, repo, number) = parse_github_platform_id(platform_id)?;
                let issue = match self.github.get_issue(&owner, &repo, number).await {
                    Ok(issue) => issue,
                    Err(GithubError::IssueNotFound { .. }) => return Ok(None),
                    Err(e) => return Err(e.into()),
                };
                let status: PlatformIssueStatus = issue
                    .state
                    .parse()
                    .map_err(|e: String| GithubError::Deserialization(e))?;

                Ok(Some(PlatformIssue {
                    platform,
                    platform_id: platform_id.to_string(),
                    status,
                }))
            }
        }
    }
}
