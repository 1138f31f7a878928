//! GitHub adapter.
//!
//! Lists the star-ranked repositories and fetches owner profiles through
//! the GitHub REST API.

pub mod client;
pub mod models;

pub use client::GitHubClient;
