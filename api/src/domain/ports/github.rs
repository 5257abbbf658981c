//! GitHub client port trait
//!
//! Defines the interface for reading issues from the GitHub API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::GithubError;

/// GitHub user representation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubUser {
    pub login: String,
    pub html_url: String,
}

/// GitHub issue representation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubIssue {
    pub number: i64,
    pub title: String,
    pub state: String,
    pub html_url: String,
}

/// GitHub issue comment representation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubComment {
    pub id: i64,
    pub body: String,
    pub user: GithubUser,
    pub created_at: String,
}

/// Port for the GitHub REST API
#[async_trait]
pub trait GithubClient: Send + Sync {
    /// Get a single issue
    async fn get_issue(&self, owner: &str, repo: &str, number: i64)
        -> Result<GithubIssue, GithubError>;

    /// List the comments on an issue, oldest first
    async fn list_comments(
        &self,
        owner: &str,
        repo: &str,
        number: i64,
    ) -> Result<Vec<GithubComment>, GithubError>;
}
