//! User profile entity

use serde::{Deserialize, Serialize};

/// A FundRequest user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub email: String,
    pub api_key_hash: String,
    #[serde(default)]
    pub ether_address: Option<String>,
    #[serde(default)]
    pub github_username: Option<String>,
}

impl UserProfile {
    /// The ether address, if it is set to something non-blank
    pub fn ether_address(&self) -> Option<&str> {
        self.ether_address
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
    }
}
