//! Repository domain models.
//!
//! A [`RepositorySummary`] is one entry of the ranked list as fetched from the
//! listing gateway. An [`EnrichedRepository`] is the same entry joined with
//! its owner's resolved coordinates, and is the unit served to clients. The
//! serialized field names of [`EnrichedRepository`] are the wire contract of
//! the `/api/top-repos` endpoint.

use serde::{Deserialize, Serialize};

use super::geocode::Coordinates;

/// Reference to a repository owner, embedded in the ranked-list response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerRef {
    /// Owner login name.
    pub login: String,
    /// Avatar image URL.
    pub avatar_url: String,
    /// Public profile page URL.
    pub html_url: String,
    /// API URL used to fetch the full owner profile.
    pub profile_url: String,
}

/// One entry of the ranked repository list. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySummary {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub language: Option<String>,
    pub html_url: String,
    pub owner: OwnerRef,
}

/// Owner block of an [`EnrichedRepository`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedOwner {
    pub login: String,
    pub avatar_url: String,
    pub html_url: String,
    /// Resolved (and possibly offset) coordinates; `null` when unresolved.
    pub location: Option<Coordinates>,
}

/// A ranked repository joined with its owner's resolved location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRepository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub language: Option<String>,
    pub html_url: String,
    pub owner: EnrichedOwner,
}

impl EnrichedRepository {
    /// Join a summary with the coordinates resolved for its owner.
    pub fn from_summary(summary: RepositorySummary, location: Option<Coordinates>) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
            full_name: summary.full_name,
            description: summary.description,
            stargazers_count: summary.stargazers_count,
            forks_count: summary.forks_count,
            language: summary.language,
            html_url: summary.html_url,
            owner: EnrichedOwner {
                login: summary.owner.login,
                avatar_url: summary.owner.avatar_url,
                html_url: summary.owner.html_url,
                location,
            },
        }
    }

    /// Whether the repository's primary language matches, ignoring case.
    pub fn has_language(&self, language: &str) -> bool {
        self.language
            .as_deref()
            .is_some_and(|l| l.eq_ignore_ascii_case(language))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn summary() -> RepositorySummary {
        RepositorySummary {
            id: 10270250,
            name: "react".to_string(),
            full_name: "facebook/react".to_string(),
            description: Some("The library for web and native user interfaces.".to_string()),
            stargazers_count: 230_000,
            forks_count: 47_000,
            language: Some("JavaScript".to_string()),
            html_url: "https://github.com/facebook/react".to_string(),
            owner: OwnerRef {
                login: "facebook".to_string(),
                avatar_url: "https://avatars.githubusercontent.com/u/69631".to_string(),
                html_url: "https://github.com/facebook".to_string(),
                profile_url: "https://api.github.com/users/facebook".to_string(),
            },
        }
    }

    #[test]
    fn test_enriched_wire_shape() {
        let enriched = EnrichedRepository::from_summary(
            summary(),
            Some(Coordinates::new(37.4848, -122.1484)),
        );
        let value = serde_json::to_value(&enriched).unwrap();

        assert_eq!(value["full_name"], json!("facebook/react"));
        assert_eq!(value["stargazers_count"], json!(230_000));
        assert_eq!(value["owner"]["login"], json!("facebook"));
        assert_eq!(value["owner"]["location"]["lat"], json!(37.4848));
        assert_eq!(value["owner"]["location"]["lon"], json!(-122.1484));
        assert!(value["owner"].get("profile_url").is_none());
    }

    #[test]
    fn test_unresolved_location_serializes_as_null() {
        let enriched = EnrichedRepository::from_summary(summary(), None);
        let value = serde_json::to_value(&enriched).unwrap();
        assert!(value["owner"]["location"].is_null());
    }

    #[test]
    fn test_has_language_is_case_insensitive() {
        let enriched = EnrichedRepository::from_summary(summary(), None);
        assert!(enriched.has_language("javascript"));
        assert!(!enriched.has_language("Rust"));
    }
}
