//! In-memory adapter for RequestRepository

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::entities::{Platform, Request, RequestId};
use crate::domain::ports::RequestRepository;
use crate::error::DomainError;

/// In-memory implementation of RequestRepository
#[derive(Default)]
pub struct InMemoryRequestRepository {
    requests: RwLock<BTreeMap<RequestId, Request>>,
}

impl InMemoryRequestRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_requests(requests: impl IntoIterator<Item = Request>) -> Self {
        Self {
            requests: RwLock::new(requests.into_iter().map(|r| (r.id, r)).collect()),
        }
    }
}

#[async_trait]
impl RequestRepository for InMemoryRequestRepository {
    async fn find_all(&self) -> Result<Vec<Request>, DomainError> {
        Ok(self.requests.read().await.values().cloned().collect())
    }

    async fn find_by_id(&self, id: &RequestId) -> Result<Option<Request>, DomainError> {
        Ok(self.requests.read().await.get(id).cloned())
    }

    async fn find_by_platform_id(
        &self,
        platform: Platform,
        platform_id: &str,
    ) -> Result<Option<Request>, DomainError> {
        Ok(self
            .requests
            .read()
            .await
            .values()
            .find(|r| {
                r.issue_information.platform == platform
                    && r.issue_information.platform_id == platform_id
            })
            .cloned())
    }

    async fn find_watched_by(&self, user: &str) -> Result<Vec<Request>, DomainError> {
        Ok(self
            .requests
            .read()
            .await
            .values()
            .filter(|r| r.is_watched_by(user))
            .cloned()
            .collect())
    }

    async fn toggle_watcher(
        &self,
        id: &RequestId,
        user: &str,
    ) -> Result<(Request, bool), DomainError> {
        let mut requests = self.requests.write().await;
        let request = requests
            .get_mut(id)
            .ok_or_else(|| DomainError::NotFound(format!("Request {} not found", id)))?;
        let watching = request.toggle_watcher(user);
        Ok((request.clone(), watching))
    }
}
