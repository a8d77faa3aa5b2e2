//! JSON-over-HTTP plumbing for moodline's API clients.
//!
//! One client type, one verb: every integration in this workspace is a GET
//! that returns a JSON body. On top of raw reqwest the crate adds:
//!
//! - per-request knobs ([`RequestOpts`]): bearer auth, query parameters,
//!   timeout and retry-budget overrides
//! - backoff on 429 and 5xx responses, honoring `Retry-After`
//! - bearer token sanitization before the Authorization header is built
//! - request/response logs that redact credential-bearing query values
//!
//! Callers that must observe every failure as it happens pass
//! `retries: Some(0)`; the timeline client does exactly that, since a
//! failed page aborts the whole tabulation.
//!
//! ```no_run
//! # async fn demo() -> Result<(), moodline_http::HttpError> {
//! let client = moodline_http::HttpClient::new("https://api.example.com")?;
//! let got: serde_json::Value = client
//!     .get_json("v1/items", moodline_http::RequestOpts::default())
//!     .await?;
//! # Ok(()) }
//! ```

use std::borrow::Cow;
use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderValue, RETRY_AFTER};
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::time::sleep;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);
const DEFAULT_RETRIES: usize = 2;

/// First backoff step; doubles per attempt.
const BACKOFF_STEP: Duration = Duration::from_millis(200);

/// Minimum wait before re-trying a 429 that carried no `Retry-After`.
const RATE_LIMIT_FLOOR: Duration = Duration::from_millis(1100);

const SNIPPET_LIMIT: usize = 500;

/// Query parameter names whose values never reach the logs.
const SECRET_PARAMS: &[&str] = &[
    "access_token",
    "authorization",
    "auth",
    "key",
    "api_key",
    "token",
    "secret",
    "client_secret",
    "bearer",
];

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("invalid URL: {0}")]
    Url(String),
    #[error("request build failed: {0}")]
    Build(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("decode error: {0}, body_snippet: {1}")]
    Decode(String, String),
    #[error("server returned error {status}: {message}, request_id={request_id}")]
    Api {
        status: StatusCode,
        message: String,
        request_id: String,
    },
}

/// How a request authenticates.
#[derive(Clone, Debug)]
pub enum Auth<'a> {
    /// `Authorization: Bearer <token>`, sanitized before use.
    Bearer(&'a str),
    None,
}

/// Per-request tuning knobs.
///
/// ```
/// use moodline_http::{Auth, RequestOpts};
/// use std::time::Duration;
///
/// let opts = RequestOpts {
///     timeout: Some(Duration::from_secs(30)),
///     retries: Some(0),
///     auth: Some(Auth::Bearer("token")),
///     ..Default::default()
/// };
/// assert_eq!(opts.timeout.unwrap().as_secs(), 30);
/// ```
#[derive(Clone, Debug, Default)]
pub struct RequestOpts<'a> {
    pub timeout: Option<Duration>,
    pub retries: Option<usize>,
    pub auth: Option<Auth<'a>>,
    pub query: Option<Vec<(&'a str, Cow<'a, str>)>>,
}

/// A GET-and-decode client anchored to one base URL.
#[derive(Clone)]
pub struct HttpClient {
    base: Url,
    inner: Client,
    pub default_timeout: Duration,
    pub max_retries: usize,
}

impl HttpClient {
    /// ```no_run
    /// use moodline_http::{HttpClient, HttpError};
    /// use std::time::Duration;
    ///
    /// let client = HttpClient::new("https://api.example.com")?;
    /// assert_eq!(client.default_timeout, Duration::from_secs(15));
    /// assert_eq!(client.max_retries, 2);
    /// # Ok::<(), HttpError>(())
    /// ```
    pub fn new(base: &str) -> Result<Self, HttpError> {
        let base = Url::parse(base).map_err(|e| HttpError::Url(e.to_string()))?;
        let inner = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| HttpError::Build(e.to_string()))?;
        Ok(Self {
            base,
            inner,
            default_timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_RETRIES,
        })
    }

    pub fn with_timeout(mut self, dur: Duration) -> Self {
        self.default_timeout = dur;
        self
    }

    pub fn with_retries(mut self, n: usize) -> Self {
        self.max_retries = n;
        self
    }

    /// GET `path` relative to the base URL and decode the JSON body.
    ///
    /// Network failures and 429/5xx statuses are retried up to the budget
    /// (`opts.retries`, falling back to the client default). Other error
    /// statuses and undecodable success bodies fail immediately.
    pub async fn get_json<T>(&self, path: &str, opts: RequestOpts<'_>) -> Result<T, HttpError>
    where
        T: DeserializeOwned,
    {
        let url = self
            .base
            .join(path)
            .map_err(|e| HttpError::Url(e.to_string()))?;
        let budget = opts.retries.unwrap_or(self.max_retries);
        let timeout = opts.timeout.unwrap_or(self.default_timeout);

        // A malformed token will never get better; reject it before the
        // first attempt rather than burning the retry budget on it.
        let bearer = match &opts.auth {
            Some(Auth::Bearer(token)) => Some(clean_bearer(token)?),
            Some(Auth::None) | None => None,
        };

        let mut attempt = 0usize;
        loop {
            let outcome = self
                .dispatch(&url, &opts, bearer.as_deref(), timeout, attempt, budget)
                .await;

            let reply = match outcome {
                Ok(reply) => reply,
                Err(message) => {
                    if attempt < budget {
                        attempt += 1;
                        let delay = backoff(attempt);
                        tracing::warn!(
                            attempt,
                            budget,
                            backoff_ms = delay.as_millis() as u64,
                            message = %message,
                            "transport failed, retrying"
                        );
                        sleep(delay).await;
                        continue;
                    }
                    return Err(HttpError::Network(message));
                }
            };

            if reply.status.is_success() {
                return serde_json::from_slice::<T>(&reply.body).map_err(|e| {
                    let snippet = snip(&reply.body);
                    tracing::warn!(
                        serde_err = %e,
                        body_snippet = %snippet,
                        "response body did not decode"
                    );
                    HttpError::Decode(e.to_string(), snippet)
                });
            }

            let message = api_error_message(&reply.body);

            if reply.retryable() && attempt < budget {
                attempt += 1;
                let delay = reply.retry_delay(attempt);
                tracing::warn!(
                    status = %reply.status,
                    attempt,
                    budget,
                    backoff_ms = delay.as_millis() as u64,
                    message = %message,
                    "retryable status, backing off"
                );
                sleep(delay).await;
                continue;
            }

            tracing::warn!(
                status = %reply.status,
                message = %message,
                request_id = %reply.request_id,
                body_snippet = %snip(&reply.body),
                "request failed"
            );
            return Err(HttpError::Api {
                status: reply.status,
                message,
                request_id: reply.request_id,
            });
        }
    }

    /// One build-send-read cycle. Transport failures come back as `Err`
    /// with a printable cause; any status at all is an `Ok` reply.
    async fn dispatch(
        &self,
        url: &Url,
        opts: &RequestOpts<'_>,
        bearer: Option<&str>,
        timeout: Duration,
        attempt: usize,
        budget: usize,
    ) -> Result<Reply, String> {
        let mut rb = self.inner.get(url.clone()).timeout(timeout);

        if let Some(q) = &opts.query {
            let pairs: Vec<(&str, &str)> = q.iter().map(|(k, v)| (*k, v.as_ref())).collect();
            rb = rb.query(&pairs);
        }

        let auth_kind = match bearer {
            Some(token) => {
                rb = rb.bearer_auth(token);
                "bearer"
            }
            None => "none",
        };

        tracing::debug!(
            attempt = attempt + 1,
            budget,
            host = url.domain().unwrap_or("-"),
            path = url.path(),
            query = ?loggable_query(opts.query.as_deref()),
            timeout_ms = timeout.as_millis() as u64,
            auth_kind,
            "issuing request"
        );

        let started = Instant::now();
        let resp = rb.send().await.map_err(|e| e.to_string())?;

        let status = resp.status();
        let headers = resp.headers().clone();
        let body = resp.bytes().await.map_err(|e| e.to_string())?.to_vec();

        let request_id = headers
            .get("x-request-id")
            .or_else(|| headers.get("x-transaction-id"))
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-")
            .to_string();

        tracing::debug!(
            %status,
            duration_ms = started.elapsed().as_millis() as u64,
            body_len = body.len(),
            request_id = %request_id,
            rate_limit_remaining = ?header_str(&headers, "x-rate-limit-remaining"),
            rate_limit_reset = ?header_str(&headers, "x-rate-limit-reset"),
            "response received"
        );

        Ok(Reply {
            status,
            headers,
            body,
            request_id,
        })
    }
}

/// A fully read response, success or not.
struct Reply {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
    request_id: String,
}

impl Reply {
    fn retryable(&self) -> bool {
        self.status == StatusCode::TOO_MANY_REQUESTS || self.status.is_server_error()
    }

    /// Wait before the next attempt: `Retry-After` when the server sent
    /// one, otherwise exponential backoff with a floor for rate limits.
    fn retry_delay(&self, attempt: usize) -> Duration {
        if let Some(secs) = header_str(&self.headers, RETRY_AFTER.as_str())
            .and_then(|v| v.parse::<u64>().ok())
        {
            return Duration::from_secs(secs);
        }
        let exp = backoff(attempt);
        if self.status == StatusCode::TOO_MANY_REQUESTS {
            exp.max(RATE_LIMIT_FLOOR)
        } else {
            exp
        }
    }
}

fn backoff(attempt: usize) -> Duration {
    // Attempts count from 1; clamp so a stray 0 cannot underflow the
    // exponent and huge attempt numbers cannot overflow the shift.
    BACKOFF_STEP.saturating_mul(1u32 << (attempt.clamp(1, 16) - 1))
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

fn loggable_query(query: Option<&[(&str, Cow<'_, str>)]>) -> Vec<(String, String)> {
    let Some(query) = query else {
        return Vec::new();
    };
    query
        .iter()
        .map(|(k, v)| {
            let value = if SECRET_PARAMS.contains(&k.to_ascii_lowercase().as_str()) {
                "<redacted>".to_string()
            } else {
                v.as_ref().to_string()
            };
            ((*k).to_string(), value)
        })
        .collect()
}

/// Pull a human-readable message out of an error body.
///
/// Understands the Twitter v1.1 envelope
/// (`{"errors":[{"code":88,"message":"…"}]}`) and the common
/// single-key shapes, falling back to a raw snippet.
fn api_error_message(body: &[u8]) -> String {
    #[derive(Deserialize)]
    struct Envelope {
        errors: Vec<EnvelopeEntry>,
    }
    #[derive(Deserialize, Default)]
    #[serde(default)]
    struct EnvelopeEntry {
        message: String,
        detail: String,
        title: String,
    }
    #[derive(Deserialize, Default)]
    #[serde(default)]
    struct Flat {
        message: String,
        detail: String,
        error: String,
    }

    if let Ok(envelope) = serde_json::from_slice::<Envelope>(body) {
        if let Some(entry) = envelope.errors.into_iter().next() {
            for text in [entry.message, entry.detail, entry.title] {
                if !text.is_empty() {
                    return text;
                }
            }
        }
    }
    if let Ok(flat) = serde_json::from_slice::<Flat>(body) {
        for text in [flat.message, flat.detail, flat.error] {
            if !text.is_empty() {
                return text;
            }
        }
    }
    snip(body)
}

fn snip(body: &[u8]) -> String {
    let mut text = String::from_utf8_lossy(body).into_owned();
    if text.len() > SNIPPET_LIMIT {
        // The cut must land on a char boundary or truncate panics on
        // multibyte bodies (unicode HTML error pages, say).
        let mut end = SNIPPET_LIMIT;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        text.truncate(end);
        text.push_str("...");
    }
    text
}

/// Normalize a user-supplied bearer token into something safe to put in
/// an Authorization header.
///
/// Tokens pasted from shells or config files routinely pick up quotes and
/// stray whitespace; those are stripped. Anything non-ASCII or containing
/// control bytes is rejected outright rather than sent mangled.
fn clean_bearer(raw: &str) -> Result<String, HttpError> {
    let mut token: String = raw
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    token = token.trim().to_string();

    if !token.is_ascii() {
        return Err(HttpError::Build("bearer token is not ASCII".into()));
    }
    if token.bytes().any(|b| b < 0x20 || b == 0x7F) {
        return Err(HttpError::Build(
            "bearer token contains control characters".into(),
        ));
    }

    HeaderValue::from_str(&format!("Bearer {token}"))
        .map_err(|e| HttpError::Build(format!("invalid Authorization header: {e}")))?;
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_cleanup_strips_quotes_and_whitespace() {
        let cleaned = clean_bearer("  \"AAAA BBBB\ncccc\"  ").unwrap();
        assert_eq!(cleaned, "AAAABBBBcccc");
    }

    #[test]
    fn bearer_cleanup_rejects_non_ascii() {
        assert!(matches!(clean_bearer("töken"), Err(HttpError::Build(_))));
    }

    #[test]
    fn twitter_error_envelope_yields_its_message() {
        let body = br#"{"errors":[{"code":88,"message":"Rate limit exceeded"}]}"#;
        assert_eq!(api_error_message(body), "Rate limit exceeded");
    }

    #[test]
    fn flat_error_key_yields_its_message() {
        let body = br#"{"error":"boom"}"#;
        assert_eq!(api_error_message(body), "boom");
    }

    #[test]
    fn unknown_bodies_fall_back_to_a_snippet() {
        assert_eq!(api_error_message(b"<html>teapot</html>"), "<html>teapot</html>");
    }

    #[test]
    fn secret_query_values_never_reach_logs() {
        let q: Vec<(&str, Cow<'_, str>)> =
            vec![("screen_name", "abc".into()), ("token", "s3cret".into())];
        let logged = loggable_query(Some(&q));
        assert_eq!(logged[0], ("screen_name".to_string(), "abc".to_string()));
        assert_eq!(logged[1].1, "<redacted>");
    }

    #[test]
    fn snippet_truncation_respects_char_boundaries() {
        // 1800 bytes of three-byte chars; a naive byte-500 cut would land
        // mid-character and panic.
        let body = "€".repeat(600);
        let snippet = api_error_message(body.as_bytes());

        assert!(snippet.ends_with("..."));
        assert!(snippet.len() <= SNIPPET_LIMIT + 3);
        assert!(snippet.trim_end_matches("...").chars().all(|c| c == '€'));
    }

    #[test]
    fn short_multibyte_bodies_pass_through_whole() {
        assert_eq!(api_error_message("不found".as_bytes()), "不found");
    }

    #[test]
    fn backoff_doubles_per_attempt() {
        assert_eq!(backoff(1), Duration::from_millis(200));
        assert_eq!(backoff(2), Duration::from_millis(400));
        assert_eq!(backoff(3), Duration::from_millis(800));
    }

    #[test]
    fn backoff_tolerates_out_of_range_attempts() {
        assert_eq!(backoff(0), backoff(1));
        assert_eq!(backoff(40), backoff(16));
    }
}
