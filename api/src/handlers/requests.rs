//! Request handlers
//!
//! Overview, detail, badge and action endpoints of funding requests.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use super::views::{RequestDetailsView, RequestView};
use crate::app::ClaimOutcome;
use crate::domain::entities::{
    github_platform_id, github_platform_id_from_url, ClaimsByTransactionAggregate, Comment,
    FundsForRequest, Platform, PlatformIssue, Request, RequestId, RequestPhase, Statistics,
    TokenValue, UserClaimable, UserProfile,
};
use crate::error::AppError;
use crate::AppState;

const CLAIM_REQUESTED_MESSAGE: &str = "Your claim has been requested and is waiting for approval.";
const MISSING_ETHER_ADDRESS_MESSAGE: &str =
    "Please update <a href=\"/profile\">your profile</a> with a correct ether address.";

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request overview page
#[derive(Debug, Serialize)]
pub struct RequestsOverviewResponse {
    /// Only requests that hold funds
    pub requests: Vec<RequestView>,
    pub statistics: Statistics,
    pub projects: Vec<String>,
    pub technologies: Vec<String>,
    pub is_authenticated: bool,
}

/// Request detail page
#[derive(Debug, Serialize)]
pub struct RequestDetailsResponse {
    pub request: RequestDetailsView,
    pub funds: FundsForRequest,
    pub pending_refund_addresses: Vec<String>,
    pub claims: ClaimsByTransactionAggregate,
    pub github_comments: Vec<Comment>,
}

/// Data for the funding badge of a request
#[derive(Debug, Serialize)]
pub struct BadgeResponse {
    pub request_phase: RequestPhase,
    pub highest_funds: Option<TokenValue>,
}

/// Actions panel of the request detail page
#[derive(Debug, Serialize)]
pub struct RequestActionsResponse {
    pub request: RequestDetailsView,
    pub user_claimable: UserClaimable,
    pub platform_issue: Option<PlatformIssue>,
}

/// Query parameters for locating a request by issue URL
#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Success,
    Danger,
}

/// Body of a redirect carrying a message for the next page
#[derive(Debug, Serialize)]
pub struct RedirectAlert {
    pub redirect: String,
    pub level: AlertLevel,
    pub message: String,
}

impl IntoResponse for RedirectAlert {
    fn into_response(self) -> Response {
        (
            StatusCode::SEE_OTHER,
            [(header::LOCATION, self.redirect.clone())],
            Json(self),
        )
            .into_response()
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /requests
///
/// Funded requests with platform statistics and filter values.
pub async fn list_requests(
    State(state): State<AppState>,
    user: Option<Extension<UserProfile>>,
) -> Result<Json<RequestsOverviewResponse>, AppError> {
    let user = user.map(|Extension(u)| u);

    let requests = state.request_service.find_all().await?;
    let views = requests
        .iter()
        .map(|r| RequestView::for_user(r, user.as_ref()))
        .filter(|v| v.funds.has_funds())
        .collect();

    Ok(Json(RequestsOverviewResponse {
        requests: views,
        statistics: state.request_service.statistics().await?,
        projects: state.request_service.find_all_projects().await?,
        technologies: state.request_service.find_all_technologies().await?,
        is_authenticated: user.is_some(),
    }))
}

/// GET /requests/:id
pub async fn get_request(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    user: Option<Extension<UserProfile>>,
) -> Result<Json<RequestDetailsResponse>, AppError> {
    let request = state.request_service.find_request(&RequestId(id)).await?;
    let user = user.map(|Extension(u)| u);

    Ok(Json(request_details(&state, request, user.as_ref()).await?))
}

/// GET /requests/github/:owner/:repo/:number
pub async fn get_github_request(
    State(state): State<AppState>,
    Path((owner, repo, number)): Path<(String, String, i64)>,
    user: Option<Extension<UserProfile>>,
) -> Result<Json<RequestDetailsResponse>, AppError> {
    let platform_id = github_platform_id(&owner, &repo, number);
    let request = state
        .request_service
        .find_request_by_platform(Platform::Github, &platform_id)
        .await?;
    let user = user.map(|Extension(u)| u);

    Ok(Json(request_details(&state, request, user.as_ref()).await?))
}

/// GET /requests/lookup?url=
///
/// Locate a request by the URL of its GitHub issue.
pub async fn lookup_request(
    State(state): State<AppState>,
    Query(query): Query<LookupQuery>,
    user: Option<Extension<UserProfile>>,
) -> Result<Json<RequestDetailsResponse>, AppError> {
    let platform_id = github_platform_id_from_url(&query.url)?;
    let request = state
        .request_service
        .find_request_by_platform(Platform::Github, &platform_id)
        .await?;
    let user = user.map(|Extension(u)| u);

    Ok(Json(request_details(&state, request, user.as_ref()).await?))
}

async fn request_details(
    state: &AppState,
    request: Request,
    user: Option<&UserProfile>,
) -> Result<RequestDetailsResponse, AppError> {
    let id = request.id;
    let (funds, pending_refund_addresses, claims) = tokio::try_join!(
        state.fund_service.funds_for_request_grouped_by_funder(&id),
        state.fund_service.pending_refund_addresses(&id),
        state.claim_service.aggregated_claims_for_request(&id),
    )?;

    // GitHub failures leave the comment list empty
    let github_comments = match state.request_service.get_comments(&id).await {
        Ok(comments) => comments,
        Err(AppError::Github(e)) => {
            tracing::warn!(request_id = %id, error = %e, "Failed to load GitHub comments");
            Vec::new()
        }
        Err(e) => return Err(e),
    };

    Ok(RequestDetailsResponse {
        request: RequestDetailsView::for_user(&request, user),
        funds,
        pending_refund_addresses,
        claims,
        github_comments,
    })
}

/// GET /requests/:id/badge
///
/// Phase and most valuable fund of a request. Never cached, funds change.
pub async fn get_badge(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let request = state.request_service.find_request(&RequestId(id)).await?;
    let highest_funds = state
        .fiat_service
        .highest_fiat_funds(&request.funds)
        .await?;

    Ok((
        [(header::CACHE_CONTROL, "no-store")],
        Json(BadgeResponse {
            request_phase: request.phase,
            highest_funds,
        }),
    )
        .into_response())
}

/// GET /requests/:id/actions
pub async fn get_actions(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    user: Option<Extension<UserProfile>>,
) -> Result<Json<RequestActionsResponse>, AppError> {
    let user = user.map(|Extension(u)| u);
    let id = RequestId(id);

    let request = state.request_service.find_request(&id).await?;
    let user_claimable = state
        .request_service
        .user_claimable(user.as_ref(), &id)
        .await?;
    let issue = &request.issue_information;
    let platform_issue = state
        .platform_issue_service
        .find_by(issue.platform, &issue.platform_id)
        .await?;

    Ok(Json(RequestActionsResponse {
        request: RequestDetailsView::for_user(&request, user.as_ref()),
        user_claimable,
        platform_issue,
    }))
}

/// POST /requests/:id/claim
///
/// Ask for the request's funds, then send the user back to the request.
pub async fn claim_request(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Extension(user): Extension<UserProfile>,
) -> Result<RedirectAlert, AppError> {
    let outcome = state
        .claim_service
        .request_claim(&user, &RequestId(id))
        .await?;

    let (level, message) = match outcome {
        ClaimOutcome::Requested(_) => (AlertLevel::Success, CLAIM_REQUESTED_MESSAGE),
        ClaimOutcome::MissingEtherAddress => (AlertLevel::Danger, MISSING_ETHER_ADDRESS_MESSAGE),
    };

    Ok(RedirectAlert {
        redirect: format!("/requests/{}", id),
        level,
        message: message.to_string(),
    })
}

/// POST /requests/:id/watch
///
/// Toggle watching; returns the request as seen by the user.
pub async fn toggle_watch(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Extension(user): Extension<UserProfile>,
) -> Result<Json<RequestView>, AppError> {
    let request = state
        .request_service
        .toggle_watch(&user, &RequestId(id))
        .await?;

    Ok(Json(RequestView::for_user(&request, Some(&user))))
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderValue, StatusCode};
    use axum_test::TestServer;
    use rust_decimal_macros::dec;
    use serde_json::Value;

    use crate::adapters::memory::{
        InMemoryClaimRepository, InMemoryFundRepository, InMemoryProfileRepository,
        InMemoryRequestRepository,
    };
    use crate::adapters::InMemoryStore;
    use crate::domain::entities::{AllFunds, FundsByFunder, RefundRequest, RefundStatus};
    use crate::domain::ports::ClaimRepository;
    use crate::test_utils::*;
    use std::sync::Arc;

    use super::*;

    fn bearer() -> HeaderValue {
        HeaderValue::from_str(&format!("Bearer {}", TEST_API_KEY)).unwrap()
    }

    fn store_with(requests: Vec<Request>) -> InMemoryStore {
        InMemoryStore {
            requests: Arc::new(InMemoryRequestRepository::with_requests(requests)),
            funds: Arc::new(InMemoryFundRepository::new()),
            claims: Arc::new(InMemoryClaimRepository::new()),
            profiles: Arc::new(
                InMemoryProfileRepository::new()
                    .with_profile(test_profile())
                    .with_profile(UserProfile {
                        email: "nobody@fundrequest.io".to_string(),
                        api_key_hash: crate::app::hash_api_key("no-address-key"),
                        ..test_profile_without_address()
                    }),
            ),
        }
    }

    fn server(
        store: InMemoryStore,
        fiat: MockFiatPriceLookup,
        github: MockGithubClient,
    ) -> TestServer {
        TestServer::new(crate::router(test_app_state(store, fiat, github))).unwrap()
    }

    #[tokio::test]
    async fn overview_lists_only_funded_requests() {
        let store = store_with(vec![
            test_request_with_funds(1, Some("100"), None),
            test_request_with_funds(2, Some("0"), Some("0")),
            test_request_with_funds(3, None, Some("5")),
        ]);
        let server = server(store, MockFiatPriceLookup::new(), MockGithubClient::new());

        let response = server.get("/requests").await;

        response.assert_status_ok();
        let body: Value = response.json();
        let ids: Vec<i64> = body["requests"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(body["statistics"]["number_of_requests"], 3);
        assert_eq!(body["projects"], serde_json::json!(["FundRequest"]));
        assert_eq!(body["is_authenticated"], false);
    }

    #[tokio::test]
    async fn overview_marks_watched_requests_for_known_user() {
        let mut watched = test_request_with_funds(1, Some("100"), None);
        watched.watchers.push(test_profile().email);
        let store = store_with(vec![watched, test_request_with_funds(2, Some("1"), None)]);
        let server = server(store, MockFiatPriceLookup::new(), MockGithubClient::new());

        let body: Value = server
            .get("/requests")
            .add_header(header::AUTHORIZATION, bearer())
            .await
            .json();

        assert_eq!(body["is_authenticated"], true);
        assert_eq!(body["requests"][0]["starred"], true);
        assert_eq!(body["requests"][1]["starred"], false);
    }

    #[tokio::test]
    async fn details_include_funds_refunds_and_comments() {
        let mut store = store_with(vec![test_request_with_funds(1, Some("100"), None)]);
        store.funds = Arc::new(
            InMemoryFundRepository::new()
                .with_funds(
                    RequestId(1),
                    vec![FundsByFunder {
                        funder_address: "0xABC".to_string(),
                        funds: AllFunds {
                            fnd_funds: Some(fnd("100")),
                            other_funds: None,
                        },
                    }],
                )
                .with_refund_request(RefundRequest {
                    id: 1,
                    request_id: RequestId(1),
                    funder_address: "0xABC".to_string(),
                    status: RefundStatus::Pending,
                })
                .with_refund_request(RefundRequest {
                    id: 2,
                    request_id: RequestId(1),
                    funder_address: "0xDEF".to_string(),
                    status: RefundStatus::Processed,
                }),
        );
        let github =
            MockGithubClient::new().with_comment(TEST_OWNER, TEST_REPO, 1, "octocat", "On it");
        let server = server(store, MockFiatPriceLookup::new(), github);

        let response = server.get("/requests/1").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["request"]["id"], 1);
        assert_eq!(body["funds"]["funds"][0]["funder_address"], "0xABC");
        assert_eq!(body["pending_refund_addresses"], serde_json::json!(["0xabc"]));
        assert_eq!(body["github_comments"][0]["user_name"], "octocat");
        assert!(body["claims"]["claims"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn anonymous_details_hide_watcher_emails() {
        let mut watched = test_request(1);
        watched.watchers.push(test_profile().email);
        let server = server(
            store_with(vec![watched]),
            MockFiatPriceLookup::new(),
            MockGithubClient::new(),
        );

        let response = server.get("/requests/1").await;

        response.assert_status_ok();
        assert!(!response.text().contains(&test_profile().email));
        assert_eq!(response.json::<Value>()["request"]["watcher_count"], 1);
    }

    #[tokio::test]
    async fn details_survive_github_failure() {
        let store = store_with(vec![test_request(1)]);
        let server = server(store, MockFiatPriceLookup::new(), MockGithubClient::failing());

        let response = server.get("/requests/1").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert!(body["github_comments"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_request_is_404() {
        let server = server(
            store_with(vec![]),
            MockFiatPriceLookup::new(),
            MockGithubClient::new(),
        );

        server.get("/requests/42").await.assert_status(StatusCode::NOT_FOUND);
        server
            .get("/requests/42/badge")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn github_route_finds_request_by_issue() {
        let store = store_with(vec![test_request(38)]);
        let server = server(store, MockFiatPriceLookup::new(), MockGithubClient::new());

        let body: Value = server
            .get("/requests/github/FundRequest/area51/38")
            .await
            .json();

        assert_eq!(body["request"]["id"], 38);
        assert_eq!(body["request"]["platform_id"], "FundRequest|FR|area51|FR|38");
    }

    #[tokio::test]
    async fn lookup_by_issue_url() {
        let store = store_with(vec![test_request(38)]);
        let server = server(store, MockFiatPriceLookup::new(), MockGithubClient::new());

        let response = server
            .get("/requests/lookup")
            .add_query_param("url", "https://github.com/FundRequest/area51/issues/38")
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["request"]["issue_number"], 38);
    }

    #[tokio::test]
    async fn lookup_rejects_malformed_url() {
        let server = server(
            store_with(vec![]),
            MockFiatPriceLookup::new(),
            MockGithubClient::new(),
        );

        server
            .get("/requests/lookup")
            .add_query_param("url", "https://example.com/not-an-issue")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn badge_picks_other_token_when_worth_more() {
        let store = store_with(vec![test_request_with_funds(1, Some("100"), Some("50"))]);
        let fiat = MockFiatPriceLookup::new()
            .with_usd("FND", dec!(10))
            .with_usd("ZRX", dec!(20));
        let server = server(store, fiat, MockGithubClient::new());

        let response = server.get("/requests/1/badge").await;

        response.assert_status_ok();
        assert_eq!(response.header(header::CACHE_CONTROL), "no-store");
        let body: Value = response.json();
        assert_eq!(body["request_phase"], "OPEN");
        assert_eq!(body["highest_funds"]["token_symbol"], "ZRX");
    }

    #[tokio::test]
    async fn badge_picks_fnd_when_worth_more() {
        let store = store_with(vec![test_request_with_funds(1, Some("100"), Some("50"))]);
        let fiat = MockFiatPriceLookup::new()
            .with_usd("FND", dec!(30))
            .with_usd("ZRX", dec!(20));
        let server = server(store, fiat, MockGithubClient::new());

        let body: Value = server.get("/requests/1/badge").await.json();

        assert_eq!(body["highest_funds"]["token_symbol"], "FND");
    }

    #[tokio::test]
    async fn badge_price_failure_is_bad_gateway() {
        let store = store_with(vec![test_request_with_funds(1, Some("100"), Some("50"))]);
        let server = server(store, MockFiatPriceLookup::failing(), MockGithubClient::new());

        server
            .get("/requests/1/badge")
            .await
            .assert_status(StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn actions_report_claimability_and_issue_status() {
        let store = store_with(vec![test_request_in_phase(
            1,
            RequestPhase::Claimable,
            Some("DavyVanRoy"),
        )]);
        let github = MockGithubClient::new().with_issue(TEST_OWNER, TEST_REPO, 1, "closed");
        let server = server(store, MockFiatPriceLookup::new(), github);

        let body: Value = server
            .get("/requests/1/actions")
            .add_header(header::AUTHORIZATION, bearer())
            .await
            .json();

        assert_eq!(body["user_claimable"]["claimable"], true);
        assert_eq!(body["user_claimable"]["claimable_by_logged_in_user"], true);
        assert_eq!(body["platform_issue"]["status"], "closed");
        assert_eq!(body["request"]["solver"], "DavyVanRoy");
    }

    #[tokio::test]
    async fn actions_without_issue_on_github() {
        let store = store_with(vec![test_request(1)]);
        let server = server(store, MockFiatPriceLookup::new(), MockGithubClient::new());

        let body: Value = server.get("/requests/1/actions").await.json();

        assert_eq!(body["user_claimable"]["claimable"], false);
        assert!(body["platform_issue"].is_null());
    }

    #[tokio::test]
    async fn claim_requires_authentication() {
        let store = store_with(vec![test_request(1)]);
        let server = server(store, MockFiatPriceLookup::new(), MockGithubClient::new());

        server
            .post("/requests/1/claim")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn claim_redirects_with_success_alert() {
        let store = store_with(vec![test_request_in_phase(
            1,
            RequestPhase::Claimable,
            Some("davyvanroy"),
        )]);
        let claims = store.claims.clone();
        let server = server(store, MockFiatPriceLookup::new(), MockGithubClient::new());

        let response = server
            .post("/requests/1/claim")
            .add_header(header::AUTHORIZATION, bearer())
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(response.header(header::LOCATION), "/requests/1");
        let body: Value = response.json();
        assert_eq!(body["level"], "success");
        assert_eq!(body["message"], CLAIM_REQUESTED_MESSAGE);

        let stored = claims.find_claim_requests(&RequestId(1)).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].address, "0x0000000");
    }

    #[tokio::test]
    async fn claim_without_ether_address_redirects_with_danger_alert() {
        let store = store_with(vec![test_request(1)]);
        let claims = store.claims.clone();
        let server = server(store, MockFiatPriceLookup::new(), MockGithubClient::new());

        let response = server
            .post("/requests/1/claim")
            .add_header(
                header::AUTHORIZATION,
                HeaderValue::from_static("Bearer no-address-key"),
            )
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
        let body: Value = response.json();
        assert_eq!(body["level"], "danger");
        assert_eq!(body["message"], MISSING_ETHER_ADDRESS_MESSAGE);
        assert!(claims
            .find_claim_requests(&RequestId(1))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn watch_toggles() {
        let store = store_with(vec![test_request(1)]);
        let server = server(store, MockFiatPriceLookup::new(), MockGithubClient::new());

        let first: Value = server
            .post("/requests/1/watch")
            .add_header(header::AUTHORIZATION, bearer())
            .await
            .json();
        let second: Value = server
            .post("/requests/1/watch")
            .add_header(header::AUTHORIZATION, bearer())
            .await
            .json();

        assert_eq!(first["starred"], true);
        assert_eq!(second["starred"], false);
    }
}
