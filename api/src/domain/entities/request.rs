//! Request domain entity
//!
//! A request is a bounty on a single issue of a code hosting platform.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::AllFunds;
use crate::error::DomainError;

/// Separator used when building platform ids out of issue coordinates
const PLATFORM_ID_SEPARATOR: &str = "|FR|";

/// Unique identifier for a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(pub i64);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Platform hosting the issue a request is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Platform {
    Github,
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Github => write!(f, "GITHUB"),
        }
    }
}

/// Build the GitHub platform id of an issue
pub fn github_platform_id(owner: &str, repo: &str, number: i64) -> String {
    format!(
        "{owner}{sep}{repo}{sep}{number}",
        sep = PLATFORM_ID_SEPARATOR
    )
}

/// Split a GitHub platform id back into owner, repo and issue number
pub fn parse_github_platform_id(platform_id: &str) -> Result<(String, String, i64), DomainError> {
    let invalid =
        || DomainError::Validation(format!("Invalid GitHub platform id: {}", platform_id));
    let mut parts = platform_id.split(PLATFORM_ID_SEPARATOR);
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(owner), Some(repo), Some(number), None) if !owner.is_empty() && !repo.is_empty() => {
            let number = number.parse::<i64>().map_err(|_| invalid())?;
            Ok((owner.to_string(), repo.to_string(), number))
        }
        _ => Err(invalid()),
    }
}

/// Parse a GitHub issue URL into its platform id
///
/// Accepts `https://github.com/{owner}/{repo}/issues/{number}`, with or
/// without a trailing slash, query or fragment.
pub fn github_platform_id_from_url(url: &str) -> Result<String, DomainError> {
    static ISSUE_URL: OnceLock<Regex> = OnceLock::new();
    let re = ISSUE_URL.get_or_init(|| {
        Regex::new(
            r"^https?://(?:www\.)?github\.com/([^/\s]+)/([^/\s]+)/issues/(\d+)/?(?:[?#].*)?$",
        )
        .expect("valid issue url regex")
    });

    let caps = re
        .captures(url.trim())
        .ok_or_else(|| DomainError::Validation(format!("Not a GitHub issue URL: {}", url)))?;
    let number = caps[3]
        .parse::<i64>()
        .map_err(|_| DomainError::Validation(format!("Invalid issue number in {}", url)))?;

    Ok(github_platform_id(&caps[1], &caps[2], number))
}

/// Phase of a request in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestPhase {
    Open,
    Claimable,
    Claimed,
    Closed,
}

impl std::fmt::Display for RequestPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestPhase::Open => write!(f, "OPEN"),
            RequestPhase::Claimable => write!(f, "CLAIMABLE"),
            RequestPhase::Claimed => write!(f, "CLAIMED"),
            RequestPhase::Closed => write!(f, "CLOSED"),
        }
    }
}

/// Where the issue behind a request lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueInformation {
    pub platform: Platform,
    pub platform_id: String,
    pub owner: String,
    pub repo: String,
    pub number: i64,
    pub title: String,
    pub link: String,
}

impl IssueInformation {
    /// Issue information for a GitHub issue
    pub fn github(owner: &str, repo: &str, number: i64, title: &str) -> Self {
        Self {
            platform: Platform::Github,
            platform_id: github_platform_id(owner, repo, number),
            owner: owner.to_string(),
            repo: repo.to_string(),
            number,
            title: title.to_string(),
            link: format!("https://github.com/{}/{}/issues/{}", owner, repo, number),
        }
    }
}

/// A funding request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub id: RequestId,
    pub issue_information: IssueInformation,
    pub phase: RequestPhase,
    /// GitHub username of whoever resolved the issue
    #[serde(default)]
    pub solver: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    /// Emails of the users watching this request
    #[serde(default)]
    pub watchers: Vec<String>,
    #[serde(default)]
    pub funds: AllFunds,
    pub created_at: DateTime<Utc>,
}

impl Request {
    pub fn is_watched_by(&self, user: &str) -> bool {
        self.watchers.iter().any(|w| w.eq_ignore_ascii_case(user))
    }

    /// Add or remove a watcher, returning whether the user now watches
    pub fn toggle_watcher(&mut self, user: &str) -> bool {
        if self.is_watched_by(user) {
            self.watchers.retain(|w| !w.eq_ignore_ascii_case(user));
            false
        } else {
            self.watchers.push(user.to_string());
            true
        }
    }
}

/// Platform-wide figures shown on the request overview
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub number_of_requests: usize,
    pub number_funded: usize,
    pub total_fnd_funded: rust_decimal::Decimal,
}
