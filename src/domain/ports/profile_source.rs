//! Owner profile port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::OwnerProfile;

/// Gateway fetching an owner's profile by its API URL.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// Fetch the profile behind `profile_url`.
    async fn fetch_profile(&self, profile_url: &str) -> DomainResult<OwnerProfile>;
}
