//! Abstraction over timeline providers.
//!
//! The pipeline crate only ever talks to [`TimelineFetcher`], so tests can
//! substitute a scripted fake and the Twitter client stays swappable.

use async_trait::async_trait;
use moodline_http::HttpError;
use thiserror::Error;

use crate::twitter::types::Tweet;

/// Errors surfaced by a timeline provider.
#[derive(Debug, Error)]
pub enum SocialError {
    /// The account handle was empty or otherwise unusable.
    #[error("invalid account handle: {0:?}")]
    InvalidHandle(String),

    /// Transport or API failure from the underlying HTTP layer.
    #[error(transparent)]
    Http(#[from] HttpError),
}

/// A source of timeline posts for a single account.
///
/// Implementations return posts newest first, exactly as the backing API
/// orders them. `older_than` is an inclusive upper bound on post ids: when
/// set, only posts with `id <= older_than` are returned. Callers that page
/// through a timeline keep the bound strictly below every id they have
/// already seen.
#[async_trait]
pub trait TimelineFetcher: Send + Sync {
    /// Fetch up to `count` posts for `handle`, newest first.
    async fn fetch(
        &self,
        handle: &str,
        count: u32,
        older_than: Option<u64>,
    ) -> Result<Vec<Tweet>, SocialError>;
}
