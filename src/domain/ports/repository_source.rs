//! Ranked repository listing port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::RepositorySummary;

/// Gateway listing the most starred repositories.
#[async_trait]
pub trait RepositorySource: Send + Sync {
    /// List up to `limit` repositories with more than `min_stars` stars,
    /// ordered by descending star count.
    ///
    /// Fails with [`DomainError::MissingCredential`](crate::domain::errors::DomainError::MissingCredential)
    /// when the gateway is not configured with a token.
    async fn list_top(&self, min_stars: u32, limit: u32) -> DomainResult<Vec<RepositorySummary>>;
}
