//! GitHub REST API response models.
//!
//! These structs map to the GitHub REST API v3 JSON payloads. They are
//! used internally by the GitHub adapter and converted into domain models
//! before leaving it.

use serde::{Deserialize, Serialize};

use crate::domain::models::{OwnerProfile, OwnerRef, RepositorySummary};

/// Response of `GET /search/repositories`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubSearchResponse {
    /// Total matches on the server side (not the page size).
    pub total_count: u64,
    /// Set when the search timed out before collecting every match.
    #[serde(default)]
    pub incomplete_results: bool,
    /// Repositories on this page, in ranked order.
    #[serde(default)]
    pub items: Vec<GitHubRepository>,
}

/// A repository item from the search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubRepository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub stargazers_count: u64,
    pub forks_count: u64,
    #[serde(default)]
    pub language: Option<String>,
    pub html_url: String,
    pub owner: GitHubOwner,
}

/// Owner reference embedded in a repository item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubOwner {
    pub login: String,
    pub avatar_url: String,
    pub html_url: String,
    /// API URL of the full user/organisation profile.
    pub url: String,
}

/// Response of `GET /users/{login}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubUser {
    pub login: String,
    pub avatar_url: String,
    pub html_url: String,
    /// Free-text location; absent or null when the user left it blank.
    #[serde(default)]
    pub location: Option<String>,
}

impl From<GitHubRepository> for RepositorySummary {
    fn from(repo: GitHubRepository) -> Self {
        Self {
            id: repo.id,
            name: repo.name,
            full_name: repo.full_name,
            description: repo.description,
            stargazers_count: repo.stargazers_count,
            forks_count: repo.forks_count,
            language: repo.language,
            html_url: repo.html_url,
            owner: OwnerRef {
                login: repo.owner.login,
                avatar_url: repo.owner.avatar_url,
                html_url: repo.owner.html_url,
                profile_url: repo.owner.url,
            },
        }
    }
}

impl From<GitHubUser> for OwnerProfile {
    fn from(user: GitHubUser) -> Self {
        Self {
            login: user.login,
            avatar_url: user.avatar_url,
            html_url: user.html_url,
            location: user.location,
        }
    }
}
