//! Nominatim search response models.

use serde::{Deserialize, Serialize};

/// One match from `GET /search?format=json`.
///
/// Coordinates are string-encoded by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NominatimPlace {
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub display_name: Option<String>,
}
