//! Client for the Twitter v1.1 user timeline endpoint.

use std::borrow::Cow;

use async_trait::async_trait;
use moodline_http::{Auth, HttpClient, HttpError, RequestOpts};

use crate::traits::{SocialError, TimelineFetcher};
use crate::twitter::types::Tweet;

/// Production API host.
pub const TWITTER_API_BASE: &str = "https://api.twitter.com";

const USER_TIMELINE_PATH: &str = "1.1/statuses/user_timeline.json";

/// Bearer-authenticated client for `1.1/statuses/user_timeline.json`.
///
/// Failures are never retried here: a timeline pull feeds an all-or-nothing
/// tabulation, so the caller must see every failure as it happens.
#[derive(Clone)]
pub struct TwitterTimelineApi {
    http: HttpClient,
    bearer: String,
}

impl TwitterTimelineApi {
    /// Client against the production API host.
    pub fn new(bearer_token: String) -> Self {
        let http = HttpClient::new(TWITTER_API_BASE).expect("twitter base url");
        Self {
            http,
            bearer: bearer_token,
        }
    }

    /// Client against an alternate host, e.g. a local mock server.
    pub fn with_base_url(base: &str, bearer_token: String) -> Result<Self, HttpError> {
        Ok(Self {
            http: HttpClient::new(base)?,
            bearer: bearer_token,
        })
    }

    /// Fetch one page of an account's timeline, newest first.
    ///
    /// `max_id` is the endpoint's inclusive upper id bound: when set, the
    /// page only contains statuses with `id <= max_id`.
    pub async fn user_timeline(
        &self,
        screen_name: &str,
        count: u32,
        max_id: Option<u64>,
    ) -> Result<Vec<Tweet>, SocialError> {
        let screen_name = normalize_handle(screen_name)?;

        let mut params: Vec<(&str, Cow<'_, str>)> = vec![
            ("screen_name", Cow::Owned(screen_name.clone())),
            ("count", Cow::Owned(count.to_string())),
        ];
        if let Some(max_id) = max_id {
            params.push(("max_id", Cow::Owned(max_id.to_string())));
        }

        let tweets: Vec<Tweet> = self
            .http
            .get_json(
                USER_TIMELINE_PATH,
                RequestOpts {
                    auth: Some(Auth::Bearer(&self.bearer)),
                    query: Some(params),
                    // Timeline pulls feed an all-or-nothing run. Surface
                    // every failure instead of papering over it.
                    retries: Some(0),
                    ..Default::default()
                },
            )
            .await?;

        tracing::debug!(
            screen_name = %screen_name,
            returned = tweets.len(),
            max_id = ?max_id,
            "fetched timeline page"
        );
        Ok(tweets)
    }
}

#[async_trait]
impl TimelineFetcher for TwitterTimelineApi {
    async fn fetch(
        &self,
        handle: &str,
        count: u32,
        older_than: Option<u64>,
    ) -> Result<Vec<Tweet>, SocialError> {
        self.user_timeline(handle, count, older_than).await
    }
}

/// Strip decoration from a user-supplied handle.
///
/// Accepts `@BBCWorld`, ` BBCWorld `, etc. Rejects handles that are empty
/// once the `@` and surrounding whitespace are gone.
fn normalize_handle(handle: &str) -> Result<String, SocialError> {
    let cleaned = handle.trim().trim_start_matches('@').trim();
    if cleaned.is_empty() {
        return Err(SocialError::InvalidHandle(handle.to_string()));
    }
    Ok(cleaned.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_at_sign_and_whitespace() {
        assert_eq!(normalize_handle("@BBCWorld").unwrap(), "BBCWorld");
        assert_eq!(normalize_handle("  nytimes ").unwrap(), "nytimes");
        assert_eq!(normalize_handle("@ Reuters").unwrap(), "Reuters");
    }

    #[test]
    fn normalize_rejects_empty_handles() {
        assert!(matches!(
            normalize_handle("   "),
            Err(SocialError::InvalidHandle(_))
        ));
        assert!(matches!(
            normalize_handle("@"),
            Err(SocialError::InvalidHandle(_))
        ));
    }
}
