//! GitHub API client
//!
//! Minimal REST client. Throttling responses are retried by a [`seatbelt`] retry layer with
//! the delay the API asks for, every attempt runs under a timeout, and every other non-200
//! status is an error.

use super::LOG_TARGET;
use crate::Result;
use chrono::{DateTime, Utc};
use core::time::Duration;
use layered::{Execute, Service, Stack};
use ohno::{IntoAppError, app_err, bail};
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, RETRY_AFTER};
use seatbelt::retry::Retry;
use seatbelt::timeout::Timeout;
use seatbelt::{RecoveryInfo, ResilienceContext};
use serde::de::DeserializeOwned;
use tick::Clock;

/// Consecutive throttled responses tolerated for one request before giving up.
pub const MAX_THROTTLE_RETRIES: u32 = 10;

/// Upper bound on a single throttling wait.
pub const MAX_THROTTLE_WAIT: Duration = Duration::from_secs(3600);

/// Default deadline for a single attempt, body included.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Wait used when a quota-exhausted response does not say when the quota resets.
const DEFAULT_RATE_LIMIT_WAIT: Duration = Duration::from_secs(60);

/// Why the API asked us to back off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrottleKind {
    /// The request quota is exhausted until `x-ratelimit-reset`.
    RateLimit,

    /// Secondary rate limit; the API supplied a `Retry-After` delay.
    AbuseDetection,
}

/// A throttling response and how long to wait before retrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Throttle {
    pub kind: ThrottleKind,
    pub delay: Duration,
}

/// Forge API client
#[derive(Debug, Clone)]
#[expect(clippy::struct_field_names, reason = "client field stores the underlying HTTP client")]
pub struct Client {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl Client {
    /// Create a client for the API at `base_url`, authenticating with `token` when given.
    pub fn new(token: Option<&str>, base_url: &str) -> Result<Self> {
        Self::with_timeout(token, base_url, REQUEST_TIMEOUT)
    }

    /// Like [`Client::new`], with a custom deadline per attempt.
    pub fn with_timeout(token: Option<&str>, base_url: &str, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let _ = headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));

        if let Some(t) = token {
            let mut auth_val = HeaderValue::from_str(&format!("token {t}"))?;
            auth_val.set_sensitive(true);
            let _ = headers.insert(AUTHORIZATION, auth_val);
        }

        let client = reqwest::Client::builder()
            .user_agent("repo-census")
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Get the base URL for this client, without a trailing slash
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `url` and deserialize the body of a 200 response.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, on any status other than 200, on an undecodable body, and
    /// when the request stays throttled for more than [`MAX_THROTTLE_RETRIES`] attempts.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let resp = self.get(url).await?;

        let status = resp.status();
        if status != StatusCode::OK {
            let body = resp.text().await.unwrap_or_default();
            bail!("request GET {url} returned {status}: {}", body.trim());
        }

        resp.json()
            .await
            .into_app_err_with(|| format!("could not decode the response to GET {url}"))
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response> {
        let clock = Clock::new_tokio();
        let context = ResilienceContext::new(&clock).name("forge_get");

        let client = self.client.clone();
        let timeout_url = url.to_string();
        let service = (
            Retry::layer("retry", &context)
                .clone_input()
                .recovery_with(|result: &Result<reqwest::Response>, _| match result {
                    Ok(resp) => classify_throttle(resp.status(), resp.headers(), Utc::now())
                        .map_or_else(RecoveryInfo::never, |throttle| RecoveryInfo::retry().delay(throttle.delay)),
                    Err(_) => RecoveryInfo::never(),
                })
                .max_retry_attempts(MAX_THROTTLE_RETRIES)
                .on_retry(|output: &Result<reqwest::Response>, args| {
                    let Ok(resp) = output else {
                        return;
                    };

                    let url = resp.url();
                    let secs = args.retry_delay().as_secs();
                    match classify_throttle(resp.status(), resp.headers(), Utc::now()).map(|t| t.kind) {
                        Some(ThrottleKind::RateLimit) => {
                            log::warn!(target: LOG_TARGET, "Request quota exhausted for request GET {url}. Retrying after {secs} seconds!");
                        }
                        Some(ThrottleKind::AbuseDetection) => {
                            log::warn!(target: LOG_TARGET, "Abuse detected for request GET {url}. Retrying after {secs} seconds!");
                        }
                        None => {}
                    }
                }),
            Timeout::layer("timeout", &context)
                .timeout_error(move |_| app_err!("request GET {timeout_url} timed out"))
                .timeout(self.timeout),
            Execute::new(move |url: String| {
                let client = client.clone();
                async move {
                    log::debug!(target: LOG_TARGET, "GET {url}");
                    client
                        .get(&url)
                        .send()
                        .await
                        .into_app_err_with(|| format!("request GET {url} failed"))
                }
            }),
        )
            .into_service();

        let resp = service.execute(url.to_string()).await?;
        if classify_throttle(resp.status(), resp.headers(), Utc::now()).is_some() {
            bail!("request GET {url} was still throttled after {MAX_THROTTLE_RETRIES} retries");
        }

        Ok(resp)
    }
}

/// Decide whether a response is a throttling response worth retrying.
///
/// Only 403 and 429 qualify. An exhausted quota (`x-ratelimit-remaining: 0`) waits until
/// `x-ratelimit-reset`; otherwise a `Retry-After` header signals abuse detection. Waits are
/// capped at [`MAX_THROTTLE_WAIT`].
#[must_use]
pub fn classify_throttle(status: StatusCode, headers: &HeaderMap, now: DateTime<Utc>) -> Option<Throttle> {
    if !matches!(status, StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS) {
        return None;
    }

    if header_number::<u64>(headers, "x-ratelimit-remaining") == Some(0) {
        let delay = header_number::<i64>(headers, "x-ratelimit-reset")
            .and_then(|reset| DateTime::from_timestamp(reset, 0))
            .map_or(DEFAULT_RATE_LIMIT_WAIT, |reset_at| (reset_at - now).to_std().unwrap_or(Duration::ZERO));

        return Some(Throttle {
            kind: ThrottleKind::RateLimit,
            delay: delay.min(MAX_THROTTLE_WAIT),
        });
    }

    header_number::<u64>(headers, RETRY_AFTER.as_str()).map(|secs| Throttle {
        kind: ThrottleKind::AbuseDetection,
        delay: Duration::from_secs(secs).min(MAX_THROTTLE_WAIT),
    })
}

fn header_number<T: core::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    headers.get(name)?.to_str().ok()?.trim().parse().ok()
}
