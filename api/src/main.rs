//! FundRequest API Server
//!
//! Serves the data behind the FundRequest request pages: funded requests,
//! their funds and claims, funding badges, and watching.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod auth;
mod config;
mod domain;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{CryptoCompareClient, GithubClientImpl, InMemoryStore, SeedData};
use app::{
    ClaimService, FiatService, FundService, PlatformIssueService, ProfileService, RequestService,
};
use config::Config;
use domain::ports::{
    ClaimRepository, FiatPriceLookup, FundRepository, GithubClient, ProfileRepository,
    RequestRepository,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub request_service: Arc<RequestService<dyn RequestRepository, dyn GithubClient>>,
    pub fund_service: Arc<FundService<dyn FundRepository>>,
    pub claim_service: Arc<ClaimService<dyn ClaimRepository, dyn RequestRepository>>,
    pub fiat_service: Arc<FiatService<dyn FiatPriceLookup>>,
    pub platform_issue_service: Arc<PlatformIssueService<dyn GithubClient>>,
    pub profile_service: Arc<ProfileService<dyn ProfileRepository>>,
    pub config: Config,
}

impl AppState {
    pub fn new(
        store: InMemoryStore,
        fiat: Arc<dyn FiatPriceLookup>,
        github: Arc<dyn GithubClient>,
        config: Config,
    ) -> Self {
        let requests: Arc<dyn RequestRepository> = store.requests;
        let funds: Arc<dyn FundRepository> = store.funds;
        let claims: Arc<dyn ClaimRepository> = store.claims;
        let profiles: Arc<dyn ProfileRepository> = store.profiles;

        Self {
            request_service: Arc::new(RequestService::new(requests.clone(), github.clone())),
            fund_service: Arc::new(FundService::new(funds)),
            claim_service: Arc::new(ClaimService::new(claims, requests)),
            fiat_service: Arc::new(FiatService::new(fiat)),
            platform_issue_service: Arc::new(PlatformIssueService::new(github)),
            profile_service: Arc::new(ProfileService::new(profiles)),
            config,
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the API router
pub fn router(state: AppState) -> Router {
    // Rate-limited routes (claiming)
    let claim_routes = Router::new().route("/requests/:id/claim", post(handlers::claim_request));
    let claim_routes = if state.config.rate_limit_enabled() {
        // PeerIpKeyExtractor reads the client IP from the socket connection
        let governor_config = GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_second(state.config.rate_limit_per_second)
            .burst_size(state.config.rate_limit_burst)
            .finish();
        match governor_config {
            Some(config) => claim_routes.layer(GovernorLayer {
                config: Arc::new(config),
            }),
            None => {
                tracing::warn!("Invalid rate limit settings, claim route is not rate limited");
                claim_routes
            }
        }
    } else {
        claim_routes
    };

    // Public pages (optional auth)
    let public_routes = Router::new()
        .route("/requests", get(handlers::list_requests))
        .route("/requests/lookup", get(handlers::lookup_request))
        .route(
            "/requests/github/:owner/:repo/:number",
            get(handlers::get_github_request),
        )
        .route("/requests/:id", get(handlers::get_request))
        .route("/requests/:id/badge", get(handlers::get_badge))
        .route("/requests/:id/actions", get(handlers::get_actions))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::optional_auth_middleware,
        ));

    // Protected routes
    let protected_routes = Router::new()
        .route("/requests/:id/watch", post(handlers::toggle_watch))
        .route("/user/requests", get(handlers::user_requests))
        .merge(claim_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ));

    Router::new()
        // Health check (no auth)
        .route("/health", get(health))
        .merge(public_routes)
        .merge(protected_routes)
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,fundrequest_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting FundRequest API...");

    // Load configuration
    let config = Config::from_env();

    // Seed the in-memory store
    let seed = match &config.seed_file {
        Some(path) => {
            tracing::info!(path = %path, "Loading seed data");
            SeedData::from_file(path)?
        }
        None => {
            tracing::warn!("SEED_FILE not set, starting with an empty store");
            SeedData::default()
        }
    };
    tracing::info!(
        requests = seed.requests.len(),
        users = seed.users.len(),
        "Store seeded"
    );
    let store = InMemoryStore::from_seed(seed);

    // Create outbound adapters
    let fiat = Arc::new(CryptoCompareClient::new(config.fiat_api_url.clone()));
    let github = Arc::new(GithubClientImpl::new(
        config.github_api_url.clone(),
        config.github_token.clone(),
    ));

    let state = AppState::new(store, fiat, github, config.clone());
    let app = router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::extract::ConnectInfo;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::adapters::memory::{InMemoryProfileRepository, InMemoryRequestRepository};
    use crate::test_utils::*;

    fn claim(id: i64) -> Request<Body> {
        Request::post(format!("/requests/{}/claim", id))
            .header(header::AUTHORIZATION, format!("Bearer {}", TEST_API_KEY))
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn claims_are_rate_limited_per_client() {
        let store = InMemoryStore {
            requests: Arc::new(InMemoryRequestRepository::with_requests(vec![test_request(1)])),
            profiles: Arc::new(InMemoryProfileRepository::new().with_profile(test_profile())),
            ..InMemoryStore::default()
        };
        let mut state = test_app_state(store, MockFiatPriceLookup::new(), MockGithubClient::new());
        state.config.rate_limit_per_second = 60;
        state.config.rate_limit_burst = 1;
        let app = router(state).layer(axum::Extension(ConnectInfo(SocketAddr::from((
            [127, 0, 0, 1],
            4000,
        )))));

        let first = app.clone().oneshot(claim(1)).await.unwrap();
        let second = app.oneshot(claim(1)).await.unwrap();

        assert_eq!(first.status(), StatusCode::SEE_OTHER);
        assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[tokio::test]
    async fn health_needs_no_auth() {
        let state = test_app_state(
            InMemoryStore::default(),
            MockFiatPriceLookup::new(),
            MockGithubClient::new(),
        );

        let response = router(state)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
