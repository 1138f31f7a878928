//! Free-text geocoder port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::Coordinates;

/// Gateway turning a free-text location into coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Look up the single best match for `query`.
    ///
    /// `Ok(None)` means the service answered but found nothing.
    async fn search(&self, query: &str) -> DomainResult<Option<Coordinates>>;
}
