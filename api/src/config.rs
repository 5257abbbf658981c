use std::env;

#[derive(Clone)]
pub struct Config {
    pub port: u16,
    /// JSON file the in-memory store is seeded from
    pub seed_file: Option<String>,
    /// Base URL of the CryptoCompare-compatible price API
    pub fiat_api_url: String,
    pub github_api_url: String,
    /// GitHub token, raises the API rate limit when set
    pub github_token: Option<String>,
    /// Seconds between refills of one claim per client IP (the governor's `per_second`)
    pub rate_limit_per_second: u64,
    /// Claim request burst per client IP, 0 disables rate limiting
    pub rate_limit_burst: u32,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            seed_file: env::var("SEED_FILE").ok(),
            fiat_api_url: env::var("FIAT_API_URL")
                .unwrap_or_else(|_| "https://min-api.cryptocompare.com".to_string()),
            github_api_url: env::var("GITHUB_API_URL")
                .unwrap_or_else(|_| "https://api.github.com".to_string()),
            github_token: env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty()),
            rate_limit_per_second: env::var("RATE_LIMIT_PER_SECOND")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(2),
            rate_limit_burst: env::var("RATE_LIMIT_BURST")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
        }
    }

    /// Check if claim rate limiting is enabled
    pub fn rate_limit_enabled(&self) -> bool {
        self.rate_limit_burst > 0 && self.rate_limit_per_second > 0
    }
}
