//! Domain errors for the repo-globe aggregation pipeline.

use thiserror::Error;

/// Domain-level errors raised by gateways, stores and services.
///
/// Services decide which of these are fatal to a refresh cycle; none of
/// them ever reach the serving boundary.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("{service} request failed: {message}")]
    UpstreamRequest { service: String, message: String },

    #[error("{service} returned {status}: {body}")]
    UpstreamStatus {
        service: String,
        status: u16,
        body: String,
    },

    #[error("Invalid response from {service}: {message}")]
    InvalidResponse { service: String, message: String },

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

impl DomainError {
    /// Build an [`DomainError::UpstreamRequest`] for a network-level failure.
    pub fn upstream_request(service: &str, message: impl ToString) -> Self {
        Self::UpstreamRequest {
            service: service.to_string(),
            message: message.to_string(),
        }
    }

    /// Build an [`DomainError::InvalidResponse`] for an unparseable payload.
    pub fn invalid_response(service: &str, message: impl ToString) -> Self {
        Self::InvalidResponse {
            service: service.to_string(),
            message: message.to_string(),
        }
    }

    /// Whether retrying the same request could succeed.
    ///
    /// Network failures and 5xx responses are transient. Client errors
    /// (bad token, rate limit exhausted, invalid query) are not.
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::UpstreamRequest { .. } => true,
            Self::UpstreamStatus { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        DomainError::DatabaseError(err.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}
