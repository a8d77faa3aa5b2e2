//! Row shape of the final table.

use chrono::DateTime;
use moodline_sentiment::SentimentScore;
use moodline_social::twitter::types::Tweet;
use serde::Serialize;

use crate::error::AnalyzeError;

/// Format of the v1.1 `created_at` field, e.g. `Wed Oct 10 20:19:24 +0000 2018`.
const CREATED_AT_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// One scored post, flattened for tabular output.
///
/// The field order here is the column order of the rendered table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentRecord {
    /// Account the post came from, exactly as the caller supplied it.
    pub handle: String,

    /// 1-based position within this account's fetched posts, newest first.
    /// Runs continuously across page boundaries.
    pub sequence: u32,

    /// Creation time as seconds since the Unix epoch.
    pub timestamp: i64,

    /// Post id.
    pub id: u64,

    pub compound: f64,
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,

    /// Post body, verbatim.
    pub text: String,
}

impl SentimentRecord {
    /// Assemble a row from a fetched post and its score.
    pub fn build(
        handle: &str,
        sequence: u32,
        tweet: &Tweet,
        score: SentimentScore,
    ) -> Result<Self, AnalyzeError> {
        let timestamp = normalize_created_at(&tweet.created_at)?;
        Ok(Self {
            handle: handle.to_string(),
            sequence,
            timestamp,
            id: tweet.id,
            compound: score.compound,
            positive: score.positive,
            neutral: score.neutral,
            negative: score.negative,
            text: tweet.text.clone(),
        })
    }
}

/// Convert a legacy Twitter timestamp to Unix seconds.
///
/// The embedded offset is honored, so wall-clock representations of the
/// same instant normalize to the same value.
pub fn normalize_created_at(raw: &str) -> Result<i64, AnalyzeError> {
    DateTime::parse_from_str(raw, CREATED_AT_FORMAT)
        .map(|moment| moment.timestamp())
        .map_err(|source| AnalyzeError::Timestamp {
            raw: raw.to_string(),
            source,
        })
}
