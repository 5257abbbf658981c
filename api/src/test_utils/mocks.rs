//! Mock implementations of outbound port traits
//!
//! They answer from configured data and record the calls they receive so
//! tests can verify behavior.

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::entities::TokenValue;
use crate::domain::ports::{FiatPriceLookup, GithubClient, GithubComment, GithubIssue, GithubUser};
use crate::error::{FiatError, GithubError};

// ============================================================================
// Mock Fiat Price Lookup
// ============================================================================

/// Fiat lookup answering a fixed USD value per token symbol
#[derive(Default)]
pub struct MockFiatPriceLookup {
    usd_by_symbol: HashMap<String, Decimal>,
    calls: Mutex<Vec<String>>,
    should_fail: bool,
}

impl MockFiatPriceLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lookup that fails every call
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// USD value returned for any amount of `symbol`
    pub fn with_usd(mut self, symbol: &str, usd: Decimal) -> Self {
        self.usd_by_symbol.insert(symbol.to_string(), usd);
        self
    }

    /// Symbols looked up so far, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl FiatPriceLookup for MockFiatPriceLookup {
    async fn usd_price(&self, token: &TokenValue) -> Result<Decimal, FiatError> {
        self.calls.lock().unwrap().push(token.token_symbol.clone());
        if self.should_fail {
            return Err(FiatError::Api {
                status: 503,
                message: "Mock failure".to_string(),
            });
        }
        self.usd_by_symbol
            .get(&token.token_symbol)
            .copied()
            .ok_or_else(|| FiatError::UnknownToken(token.token_symbol.clone()))
    }
}

// ============================================================================
// Mock GitHub Client
// ============================================================================

type IssueKey = (String, String, i64);

fn key(owner: &str, repo: &str, number: i64) -> IssueKey {
    (owner.to_string(), repo.to_string(), number)
}

#[derive(Default)]
pub struct MockGithubClient {
    issues: HashMap<IssueKey, GithubIssue>,
    comments: HashMap<IssueKey, Vec<GithubComment>>,
    should_fail: bool,
}

impl MockGithubClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that fails all operations
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    pub fn with_issue(mut self, owner: &str, repo: &str, number: i64, state: &str) -> Self {
        self.issues.insert(
            key(owner, repo, number),
            GithubIssue {
                number,
                title: format!("Issue #{}", number),
                state: state.to_string(),
                html_url: format!("https://github.com/{}/{}/issues/{}", owner, repo, number),
            },
        );
        self
    }

    pub fn with_comment(
        mut self,
        owner: &str,
        repo: &str,
        number: i64,
        author: &str,
        body: &str,
    ) -> Self {
        let comments = self.comments.entry(key(owner, repo, number)).or_default();
        comments.push(GithubComment {
            id: comments.len() as i64 + 1,
            body: body.to_string(),
            user: GithubUser {
                login: author.to_string(),
                html_url: format!("https://github.com/{}", author),
            },
            created_at: "2018-03-01T10:00:00Z".to_string(),
        });
        self
    }

    fn failure() -> GithubError {
        GithubError::Api {
            status: 500,
            message: "Mock failure".to_string(),
        }
    }
}

#[async_trait]
impl GithubClient for MockGithubClient {
    async fn get_issue(
        &self,
        owner: &str,
        repo: &str,
        number: i64,
    ) -> Result<GithubIssue, GithubError> {
        if self.should_fail {
            return Err(Self::failure());
        }
        self.issues
            .get(&key(owner, repo, number))
            .cloned()
            .ok_or_else(|| GithubError::IssueNotFound {
                owner: owner.to_string(),
                repo: repo.to_string(),
                number,
            })
    }

    async fn list_comments(
        &self,
        owner: &str,
        repo: &str,
        number: i64,
    ) -> Result<Vec<GithubComment>, GithubError> {
        if self.should_fail {
            return Err(Self::failure());
        }
        Ok(self
            .comments
            .get(&key(owner, repo, number))
            .cloned()
            .unwrap_or_default())
    }
}
