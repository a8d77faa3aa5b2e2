//! Failure taxonomy for a tabulation run.

use moodline_sentiment::ScoreError;
use moodline_social::SocialError;
use thiserror::Error;

/// Why a run was abandoned.
///
/// Every variant aborts the whole run. The caller never sees the rows
/// accumulated before the failure.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// A timeline page could not be fetched.
    #[error("timeline fetch failed for {handle:?}")]
    Fetch {
        handle: String,
        #[source]
        source: SocialError,
    },

    /// The sentiment model rejected a post body.
    #[error(transparent)]
    Score(#[from] ScoreError),

    /// A post carried a creation time that does not parse.
    #[error("unparseable post timestamp {raw:?}")]
    Timestamp {
        raw: String,
        #[source]
        source: chrono::ParseError,
    },
}
