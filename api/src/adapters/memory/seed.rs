//! Seed data for the in-memory store
//!
//! The store is loaded once at startup from a JSON document.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context};
use serde::Deserialize;

use super::{
    InMemoryClaimRepository, InMemoryFundRepository, InMemoryProfileRepository,
    InMemoryRequestRepository,
};
use crate::domain::entities::{
    AllFunds, Claim, FundsByFunder, PendingFund, RefundRequest, Request, RequestId, UserProfile,
};

/// Funds of one funder on one request
#[derive(Debug, Deserialize)]
pub struct SeedFunds {
    pub request_id: RequestId,
    pub funder_address: String,
    #[serde(flatten)]
    pub funds: AllFunds,
}

/// Document the in-memory store is seeded from
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SeedData {
    pub requests: Vec<Request>,
    pub funds: Vec<SeedFunds>,
    pub pending_funds: Vec<PendingFund>,
    pub refund_requests: Vec<RefundRequest>,
    pub claims: Vec<Claim>,
    pub users: Vec<UserProfile>,
}

impl SeedData {
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading seed file {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("loading seed file {}", path.display()))
    }

    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        let seed: SeedData = serde_json::from_str(raw)?;
        seed.validate()?;
        Ok(seed)
    }

    fn validate(&self) -> anyhow::Result<()> {
        let mut ids = HashSet::new();
        for request in &self.requests {
            if !ids.insert(request.id) {
                bail!("duplicate request id {}", request.id);
            }
            request
                .funds
                .validate()
                .with_context(|| format!("funds of request {}", request.id))?;
        }
        for funds in &self.funds {
            if !ids.contains(&funds.request_id) {
                bail!("funds for unknown request {}", funds.request_id);
            }
            funds.funds.validate()?;
        }
        for claim in &self.claims {
            if !ids.contains(&claim.request_id) {
                bail!("claim for unknown request {}", claim.request_id);
            }
            claim
                .funds
                .validate()
                .with_context(|| format!("claim {}", claim.transaction_hash))?;
        }
        for pending in &self.pending_funds {
            pending
                .amount
                .validate()
                .with_context(|| format!("pending fund {}", pending.transaction_hash))?;
        }
        Ok(())
    }
}

/// The in-memory repositories, shared between services
#[derive(Clone, Default)]
pub struct InMemoryStore {
    pub requests: Arc<InMemoryRequestRepository>,
    pub funds: Arc<InMemoryFundRepository>,
    pub claims: Arc<InMemoryClaimRepository>,
    pub profiles: Arc<InMemoryProfileRepository>,
}

impl InMemoryStore {
    pub fn from_seed(seed: SeedData) -> Self {
        let mut funds = InMemoryFundRepository::new();
        let mut grouped: Vec<(RequestId, Vec<FundsByFunder>)> = Vec::new();
        for entry in seed.funds {
            let by_funder = FundsByFunder {
                funder_address: entry.funder_address,
                funds: entry.funds,
            };
            match grouped.iter_mut().find(|(id, _)| *id == entry.request_id) {
                Some((_, list)) => list.push(by_funder),
                None => grouped.push((entry.request_id, vec![by_funder])),
            }
        }
        for (request_id, list) in grouped {
            funds = funds.with_funds(request_id, list);
        }
        for pending in seed.pending_funds {
            funds = funds.with_pending_fund(pending);
        }
        for refund in seed.refund_requests {
            funds = funds.with_refund_request(refund);
        }

        let claims = seed
            .claims
            .into_iter()
            .fold(InMemoryClaimRepository::new(), |repo, c| repo.with_claim(c));
        let profiles = seed
            .users
            .into_iter()
            .fold(InMemoryProfileRepository::new(), |repo, u| {
                repo.with_profile(u)
            });

        Self {
            requests: Arc::new(InMemoryRequestRepository::with_requests(seed.requests)),
            funds: Arc::new(funds),
            claims: Arc::new(claims),
            profiles: Arc::new(profiles),
        }
    }
}
