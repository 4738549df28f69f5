//! GitHub REST API client
//!
//! Minimal client that issues GET requests and classifies the outcome, plus the
//! payload types for the handful of endpoints the fetcher uses.

use chrono::{DateTime, Utc};
use core::time::Duration;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, RETRY_AFTER};
use serde::Deserialize;
use serde::de::DeserializeOwned;

const USER_AGENT: &str = "reposcope";
const GITHUB_V3_MEDIA_TYPE: &str = "application/vnd.github.v3+json";

#[derive(Debug, Deserialize)]
pub struct OwnerPayload {
    pub login: String,
}

#[derive(Debug, Deserialize)]
pub struct RepositoryPayload {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub owner: OwnerPayload,
    pub description: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub disabled: bool,
}

#[derive(Debug, Deserialize)]
pub struct SearchPayload {
    #[serde(default)]
    pub items: Vec<RepositoryPayload>,
}

#[derive(Debug, Deserialize)]
pub struct ContributorPayload {
    pub login: String,
    #[serde(default)]
    pub contributions: u64,
}

#[derive(Debug, Deserialize)]
pub struct CommitPayload {
    pub sha: String,
    pub commit: CommitDetailPayload,
}

#[derive(Debug, Deserialize)]
pub struct CommitDetailPayload {
    #[serde(default)]
    pub message: String,
    pub author: Option<CommitAuthorPayload>,
}

#[derive(Debug, Deserialize)]
pub struct CommitAuthorPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub date: String,
}

#[derive(Debug, Deserialize)]
pub struct LabelPayload {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct IssuePayload {
    pub number: u64,
    #[serde(default)]
    pub title: String,
    pub state: String,
    #[serde(default)]
    pub created_at: String,
    pub closed_at: Option<String>,
    #[serde(default)]
    pub labels: Vec<LabelPayload>,
}

/// Rate limit information from response headers
#[derive(Debug, Clone, Copy)]
pub struct RateLimitInfo {
    pub remaining: usize,
    pub reset_at: DateTime<Utc>,
}

/// Result of a hosting API call
#[derive(Debug)]
pub enum HostingApiResult<T> {
    /// Request succeeded
    Success(T),

    /// Quota exhausted; carries the reset time when the service reported one
    RateLimited(Option<DateTime<Utc>>),

    /// The requested resource was not found (404)
    NotFound,

    /// Transport failure, non-2xx status, or undecodable payload
    Failed(ohno::AppError),
}

/// Hosting API client
#[derive(Debug, Clone)]
#[expect(clippy::struct_field_names, reason = "client field stores the underlying HTTP client")]
pub struct Client {
    client: reqwest::Client,
    base_url: String,
}

impl Client {
    /// Create a new hosting API client with optional authentication token and base URL
    pub fn new(token: Option<&str>, base_url: impl Into<String>, timeout: Duration) -> crate::Result<Self> {
        let mut headers = HeaderMap::new();
        let _ = headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_V3_MEDIA_TYPE));

        if let Some(t) = token {
            let mut auth_val = HeaderValue::from_str(&format!("token {t}"))?;
            auth_val.set_sensitive(true);
            let _ = headers.insert(AUTHORIZATION, auth_val);
        }

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Get the base URL for this client
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` (relative to the base URL) and decode the JSON body
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> HostingApiResult<T> {
        let url = format!("{}{path}", self.base_url);

        let resp = match self.client.get(&url).query(query).send().await {
            Ok(r) => r,
            Err(e) => return HostingApiResult::Failed(e.into()),
        };

        let status = resp.status();
        if status.is_success() {
            return match resp.json::<T>().await {
                Ok(data) => HostingApiResult::Success(data),
                Err(e) => HostingApiResult::Failed(e.into()),
            };
        }

        let status_code = status.as_u16();
        if status_code == 429 || (status_code == 403 && is_quota_exhausted(resp.headers())) {
            return HostingApiResult::RateLimited(extract_reset_hint(resp.headers()));
        }

        if status_code == 403 {
            return HostingApiResult::Failed(ohno::app_err!("access to {url} is forbidden"));
        }

        if status_code == 404 {
            return HostingApiResult::NotFound;
        }

        match resp.error_for_status() {
            Err(e) => HostingApiResult::Failed(e.into()),
            Ok(resp) => HostingApiResult::Failed(ohno::app_err!("unexpected HTTP status {} from {url}", resp.status())),
        }
    }
}

/// Work out when a rate limit lifts, preferring the explicit reset header.
fn extract_reset_hint(headers: &HeaderMap) -> Option<DateTime<Utc>> {
    extract_rate_limit_from_headers(headers)
        .map(|rl| rl.reset_at)
        .or_else(|| parse_retry_after(headers).map(|secs| Utc::now() + chrono::Duration::seconds(secs)))
}

/// Whether a 403 means the rate limit was hit rather than access being denied.
///
/// A 403 that still reports remaining quota is a permission failure, unless the
/// service asked for a backoff with `Retry-After` (secondary rate limits).
fn is_quota_exhausted(headers: &HeaderMap) -> bool {
    if headers.contains_key(RETRY_AFTER) {
        return true;
    }

    extract_rate_limit_from_headers(headers).is_none_or(|rl| rl.remaining == 0)
}

/// Extract rate limit information from API response headers
fn extract_rate_limit_from_headers(headers: &HeaderMap) -> Option<RateLimitInfo> {
    let remaining = headers.get("x-ratelimit-remaining")?.to_str().ok()?.parse::<usize>().ok()?;
    let reset_timestamp = headers.get("x-ratelimit-reset")?.to_str().ok()?.parse::<i64>().ok()?;
    let reset_at = DateTime::from_timestamp(reset_timestamp, 0)?;

    Some(RateLimitInfo { remaining, reset_at })
}

/// Parse the `Retry-After` header value as seconds.
fn parse_retry_after(headers: &HeaderMap) -> Option<i64> {
    headers.get(RETRY_AFTER)?.to_str().ok()?.parse::<i64>().ok()
}
