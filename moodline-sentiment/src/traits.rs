//! Abstraction over sentiment models.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Intensity components for one piece of text.
///
/// `positive`, `neutral` and `negative` are proportions of the text and sum
/// to roughly 1.0 for non-empty input. `compound` is the normalized
/// aggregate in `[-1.0, 1.0]`, with the sign giving the overall polarity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
    pub compound: f64,
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
}

/// Errors surfaced by a sentiment model.
#[derive(Debug, Error)]
pub enum ScoreError {
    /// The model produced output missing an expected component.
    #[error("scorer returned a malformed result: missing component {0:?}")]
    Malformed(&'static str),
}

/// A black-box sentiment model.
///
/// Scoring is pure CPU work, so the trait is synchronous. Implementations
/// must be deterministic: the same text always yields the same score.
pub trait SentimentScorer: Send + Sync {
    fn score(&self, text: &str) -> Result<SentimentScore, ScoreError>;
}
