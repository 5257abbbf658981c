//! In-memory adapter for ProfileRepository

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::entities::UserProfile;
use crate::domain::ports::ProfileRepository;
use crate::error::DomainError;

/// In-memory implementation of ProfileRepository
#[derive(Default)]
pub struct InMemoryProfileRepository {
    profiles: RwLock<Vec<UserProfile>>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(mut self, profile: UserProfile) -> Self {
        self.profiles.get_mut().push(profile);
        self
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn find_by_api_key_hash(&self, hash: &str) -> Result<Option<UserProfile>, DomainError> {
        Ok(self
            .profiles
            .read()
            .await
            .iter()
            .find(|p| p.api_key_hash == hash)
            .cloned())
    }
}
