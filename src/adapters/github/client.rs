//! GitHub HTTP client with rate limiting.
//!
//! Wraps the two GitHub REST API v3 operations the pipeline needs: the
//! repository search used for the ranked list and the user lookup used for
//! owner profiles. Requests share a `governor` rate limiter sized to the
//! authenticated hourly budget, and the ranked-list request retries
//! transient failures with exponential backoff.

use std::collections::HashSet;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use backoff::ExponentialBackoffBuilder;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{GitHubConfig, OwnerProfile, RepositorySummary, RetryConfig};
use crate::domain::ports::{ProfileSource, RepositorySource};

use super::models::{GitHubSearchResponse, GitHubUser};

const SERVICE: &str = "github";

/// The search API never returns more than this many results per page.
const MAX_PER_PAGE: u32 = 100;

/// The search API never returns more than this many results in total.
pub const MAX_SEARCH_RESULTS: u32 = 1000;

/// HTTP client for the GitHub REST API v3.
///
/// Implements both [`RepositorySource`] and [`ProfileSource`].
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    api_base_url: String,
    /// Personal access token; `None` makes ranked-list requests fail fast.
    token: Option<String>,
    rate_limiter: Arc<DefaultDirectRateLimiter>,
    retry: RetryConfig,
}

impl GitHubClient {
    /// Create a client from configuration.
    pub fn new(config: &GitHubConfig, retry: RetryConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .pool_max_idle_per_host(10)
            .build()
            .context("Failed to build GitHub HTTP client")?;

        let per_hour = NonZeroU32::new(config.requests_per_hour).unwrap_or(NonZeroU32::MIN);

        Ok(Self {
            http,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token: config.token.clone().filter(|t| !t.trim().is_empty()),
            rate_limiter: Arc::new(RateLimiter::direct(Quota::per_hour(per_hour))),
            retry,
        })
    }

    /// Whether a token is configured.
    pub const fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Wait for a rate-limit slot and issue an authorized GET.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> DomainResult<T> {
        self.rate_limiter.until_ready().await;

        let mut request = self
            .http
            .get(url)
            .query(query)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28");
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("token {token}"));
        }

        let resp = request
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

        resp.json::<T>()
            .await
            .map_err(|e| DomainError::invalid_response(SERVICE, e))
    }

    /// Fetch one page of the star-ranked search, retrying transient failures.
    async fn search_page(
        &self,
        min_stars: u32,
        per_page: u32,
        page: u32,
    ) -> DomainResult<GitHubSearchResponse> {
        let url = format!("{}/search/repositories", self.api_base_url);
        let query = [
            ("q", format!("stars:>{min_stars}")),
            ("sort", "stars".to_string()),
            ("order", "desc".to_string()),
            ("per_page", per_page.to_string()),
            ("page", page.to_string()),
        ];

        let policy = ExponentialBackoffBuilder::new()
            .with_initial_interval(Duration::from_millis(self.retry.initial_backoff_ms))
            .with_max_interval(Duration::from_millis(self.retry.max_backoff_ms))
            .with_max_elapsed_time(None)
            .build();

        let max_retries = self.retry.max_retries;
        let mut attempt = 0u32;

        backoff::future::retry(policy, || {
            attempt += 1;
            let current = attempt;
            let url = &url;
            let query = &query;
            async move {
                match self.get_json::<GitHubSearchResponse>(url, query).await {
                    Ok(page) => Ok(page),
                    Err(err) if err.is_transient() && current <= max_retries => {
                        tracing::warn!(
                            page,
                            attempt = current,
                            error = %err,
                            "GitHub search failed, retrying"
                        );
                        Err(backoff::Error::transient(err))
                    }
                    Err(err) => Err(backoff::Error::permanent(err)),
                }
            }
        })
        .await
    }
}

#[async_trait]
impl RepositorySource for GitHubClient {
    async fn list_top(&self, min_stars: u32, limit: u32) -> DomainResult<Vec<RepositorySummary>> {
        if self.token.is_none() {
            return Err(DomainError::MissingCredential(
                "GitHub token not configured".to_string(),
            ));
        }

        let limit = limit.clamp(1, MAX_SEARCH_RESULTS);
        let per_page = limit.min(MAX_PER_PAGE);
        let pages = limit.div_ceil(per_page);

        let mut seen = HashSet::new();
        let mut repositories = Vec::with_capacity(limit as usize);

        for page in 1..=pages {
            let response = self.search_page(min_stars, per_page, page).await?;
            if response.incomplete_results {
                tracing::warn!(page, "GitHub search returned incomplete results");
            }

            let received = response.items.len();
            // Rankings can shift between page requests; keep the first sighting.
            repositories.extend(
                response
                    .items
                    .into_iter()
                    .filter(|repo| seen.insert(repo.id))
                    .map(RepositorySummary::from),
            );

            if received < per_page as usize {
                break;
            }
        }

        repositories.truncate(limit as usize);
        tracing::debug!(count = repositories.len(), "fetched ranked repositories");
        Ok(repositories)
    }
}

#[async_trait]
impl ProfileSource for GitHubClient {
    async fn fetch_profile(&self, profile_url: &str) -> DomainResult<OwnerProfile> {
        self.get_json::<GitHubUser>(profile_url, &[])
            .await
            .map(OwnerProfile::from)
    }
}
