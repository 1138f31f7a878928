//! Owner profile model.

use serde::{Deserialize, Serialize};

/// A repository owner's profile as returned by the profile gateway.
///
/// Only `location` feeds the pipeline; the rest is kept for logging and
/// for callers that want the full record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OwnerProfile {
    pub login: String,
    pub avatar_url: String,
    pub html_url: String,
    /// Free-text location as entered by the owner, if any.
    pub location: Option<String>,
}

impl OwnerProfile {
    /// Stand-in profile used when the real one could not be fetched.
    pub fn without_location(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            ..Self::default()
        }
    }

    /// The location string, if present and not blank.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref().filter(|l| !l.trim().is_empty())
    }
}
