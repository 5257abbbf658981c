//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use std::sync::Arc;

use chrono::{TimeZone, Utc};

use crate::adapters::InMemoryStore;
use crate::app::hash_api_key;
use crate::config::Config;
use crate::domain::entities::{
    AllFunds, IssueInformation, Request, RequestId, RequestPhase, TokenValue, UserProfile,
};
use crate::domain::ports::{FiatPriceLookup, GithubClient};
use crate::AppState;

/// API key of the profile returned by `test_profile`
pub const TEST_API_KEY: &str = "fr-test-api-key";

/// Owner and repo of the issues behind test requests
pub const TEST_OWNER: &str = "FundRequest";
pub const TEST_REPO: &str = "area51";

/// FND token value
pub fn fnd(amount: &str) -> TokenValue {
    TokenValue::new("FND", amount.parse().unwrap()).unwrap()
}

/// ZRX token value, used as the "other" token
pub fn zrx(amount: &str) -> TokenValue {
    TokenValue::new("ZRX", amount.parse().unwrap()).unwrap()
}

/// Create a test request for issue `FundRequest/area51#{id}` without funds
pub fn test_request(id: i64) -> Request {
    Request {
        id: RequestId(id),
        issue_information: IssueInformation::github(
            TEST_OWNER,
            TEST_REPO,
            id,
            &format!("Test issue #{}", id),
        ),
        phase: RequestPhase::Open,
        solver: None,
        technologies: vec!["java".to_string()],
        watchers: vec![],
        funds: AllFunds::default(),
        created_at: Utc.with_ymd_and_hms(2018, 3, 1, 10, 0, 0).unwrap(),
    }
}

/// Create a test request with FND and/or ZRX funds
pub fn test_request_with_funds(
    id: i64,
    fnd_amount: Option<&str>,
    zrx_amount: Option<&str>,
) -> Request {
    Request {
        funds: AllFunds {
            fnd_funds: fnd_amount.map(fnd),
            other_funds: zrx_amount.map(zrx),
        },
        ..test_request(id)
    }
}

/// Create a test request in a specific phase
pub fn test_request_in_phase(id: i64, phase: RequestPhase, solver: Option<&str>) -> Request {
    Request {
        phase,
        solver: solver.map(str::to_string),
        ..test_request(id)
    }
}

/// Create a test user with an ether address and GitHub account
pub fn test_profile() -> UserProfile {
    UserProfile {
        email: "davyvanroy@fundrequest.io".to_string(),
        api_key_hash: hash_api_key(TEST_API_KEY),
        ether_address: Some("0x0000000".to_string()),
        github_username: Some("davyvanroy".to_string()),
    }
}

/// Create a test user that never filled in an ether address
pub fn test_profile_without_address() -> UserProfile {
    UserProfile {
        ether_address: Some(String::new()),
        ..test_profile()
    }
}

/// Configuration for tests, rate limiting disabled
pub fn test_config() -> Config {
    Config {
        port: 0,
        seed_file: None,
        fiat_api_url: "http://prices.test".to_string(),
        github_api_url: "http://github.test".to_string(),
        github_token: None,
        rate_limit_per_second: 0,
        rate_limit_burst: 0,
    }
}

/// Application state over the given store and outbound mocks
pub fn test_app_state<F, G>(store: InMemoryStore, fiat: F, github: G) -> AppState
where
    F: FiatPriceLookup + 'static,
    G: GithubClient + 'static,
{
    AppState::new(store, Arc::new(fiat), Arc::new(github), test_config())
}
