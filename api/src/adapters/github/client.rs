//! GitHub API client implementation

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use urlencoding::encode;

use crate::domain::ports::{GithubClient, GithubComment, GithubIssue};
use crate::error::GithubError;

const USER_AGENT: &str = "FundRequest-API";

/// Implementation of the GitHub API client
pub struct GithubClientImpl {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl GithubClientImpl {
    pub fn new(base_url: String, token: Option<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn issue_url(&self, owner: &str, repo: &str, number: i64) -> String {
        format!(
            "{}/repos/{}/{}/issues/{}",
            self.base_url,
            encode(owner),
            encode(repo),
            number
        )
    }

    fn get(&self, url: String) -> reqwest::RequestBuilder {
        let request = self
            .http
            .get(url)
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", USER_AGENT);
        match &self.token {
            Some(token) => request.header("Authorization", format!("Bearer {}", token)),
            None => request,
        }
    }

    async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
        owner: &str,
        repo: &str,
        number: i64,
    ) -> Result<T, GithubError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| GithubError::Deserialization(e.to_string()))
        } else if status.as_u16() == 401 {
            Err(GithubError::Unauthorized)
        } else if status.as_u16() == 404 {
            Err(GithubError::IssueNotFound {
                owner: owner.to_string(),
                repo: repo.to_string(),
                number,
            })
        } else if status.as_u16() == 429
            || (status.as_u16() == 403 && is_rate_limited(&response))
        {
            Err(GithubError::RateLimited)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(GithubError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

/// GitHub signals exhausted rate limits with a 403 and a zero remaining header
fn is_rate_limited(response: &reqwest::Response) -> bool {
    response
        .headers()
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == "0")
}

#[async_trait]
impl GithubClient for GithubClientImpl {
    async fn get_issue(
        &self,
        owner: &str,
        repo: &str,
        number: i64,
    ) -> Result<GithubIssue, GithubError> {
        let response = self.get(self.issue_url(owner, repo, number)).send().await?;
        self.handle_response(response, owner, repo, number).await
    }

    async fn list_comments(
        &self,
        owner: &str,
        repo: &str,
        number: i64,
    ) -> Result<Vec<GithubComment>, GithubError> {
        let url = format!("{}/comments?per_page=100", self.issue_url(owner, repo, number));
        let response = self.get(url).send().await?;
        self.handle_response(response, owner, repo, number).await
    }
}
