//! Platform issue entity
//!
//! The state of the issue behind a request, as reported by the platform.

use serde::{Deserialize, Serialize};

use super::Platform;

/// Issue status on the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlatformIssueStatus {
    Open,
    Closed,
}

impl std::str::FromStr for PlatformIssueStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "open" => Ok(PlatformIssueStatus::Open),
            "closed" => Ok(PlatformIssueStatus::Closed),
            _ => Err(format!("Unknown issue state: {}", s)),
        }
    }
}

/// An issue as seen on its platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformIssue {
    pub platform: Platform,
    pub platform_id: String,
    pub status: PlatformIssueStatus,
}

/// A comment on the issue behind a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub user_name: String,
    pub user_url: String,
    pub body: String,
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parse() {
        assert_eq!(
            "open".parse::<PlatformIssueStatus>().unwrap(),
            PlatformIssueStatus::Open
        );
        assert_eq!(
            "CLOSED".parse::<PlatformIssueStatus>().unwrap(),
            PlatformIssueStatus::Closed
        );
        assert!("merged".parse::<PlatformIssueStatus>().is_err());
    }
}
