//! Snapshot model: the published list of enriched repositories.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::repository::EnrichedRepository;

/// The latest fully-resolved list served to clients.
///
/// Replaced wholesale at the end of each successful refresh cycle and never
/// edited in place.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Snapshot {
    /// Entries in ranked-list order.
    pub repositories: Vec<EnrichedRepository>,
    /// When the snapshot was published; `None` before the first success.
    pub refreshed_at: Option<DateTime<Utc>>,
}

impl Snapshot {
    /// A freshly published snapshot stamped with the current time.
    pub fn published(repositories: Vec<EnrichedRepository>) -> Self {
        Self {
            repositories,
            refreshed_at: Some(Utc::now()),
        }
    }

    pub fn len(&self) -> usize {
        self.repositories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repositories.is_empty()
    }
}
