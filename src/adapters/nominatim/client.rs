//! Nominatim HTTP client.

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::Client;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Coordinates, GeocoderConfig};
use crate::domain::ports::Geocoder;

use super::models::NominatimPlace;

const SERVICE: &str = "nominatim";

/// Client for the Nominatim `/search` endpoint.
///
/// The public instance allows one request per second per client; the
/// limiter enforces the configured budget across all concurrent callers.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    http: Client,
    base_url: String,
    rate_limiter: Arc<DefaultDirectRateLimiter>,
}

impl NominatimClient {
    /// Create a client from configuration.
    pub fn new(config: &GeocoderConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .context("Failed to build Nominatim HTTP client")?;

        let per_second = NonZeroU32::new(config.requests_per_second).unwrap_or(NonZeroU32::MIN);

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            rate_limiter: Arc::new(RateLimiter::direct(Quota::per_second(per_second))),
        })
    }
}

#[async_trait]
impl Geocoder for NominatimClient {
    async fn search(&self, query: &str) -> DomainResult<Option<Coordinates>> {
        self.rate_limiter.until_ready().await;

        let resp = self
            .http
            .get(format!("{}/search", self.base_url))
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| DomainError::upstream_request(SERVICE, e))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(DomainError::UpstreamStatus {
                service: SERVICE.to_string(),
                status,
                body,
            });
        }

        let places: Vec<NominatimPlace> = resp
            .json()
            .await
            .map_err(|e| DomainError::invalid_response(SERVICE, e))?;

        let Some(best) = places.into_iter().next() else {
            return Ok(None);
        };

        Coordinates::parse(&best.lat, &best.lon).map(Some).ok_or_else(|| {
            DomainError::invalid_response(
                SERVICE,
                format!("unusable coordinates lat={} lon={}", best.lat, best.lon),
            )
        })
    }
}
