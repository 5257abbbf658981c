//! Profile service
//!
//! Identifies users by API key.

use std::sync::Arc;

use sha2::{Digest, Sha256};

use crate::domain::entities::UserProfile;
use crate::domain::ports::ProfileRepository;
use crate::error::AppError;

/// Service for user profiles
pub struct ProfileService<PR>
where
    PR: ProfileRepository + ?Sized,
{
    profiles: Arc<PR>,
}

impl<PR> ProfileService<PR>
where
    PR: ProfileRepository + ?Sized,
{
    pub fn new(profiles: Arc<PR>) -> Self {
        Self { profiles }
    }

    /// Find a user by their API key hash
    pub async fn find_by_api_key(
        &self,
        api_key_hash: &str,
    ) -> Result<Option<UserProfile>, AppError> {
        Ok(self.profiles.find_by_api_key_hash(api_key_hash).await?)
    }
}

/// Hash an API key for lookup
pub fn hash_api_key(api_key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(api_key.as_bytes());
    hex::encode(hasher.finalize())
}
