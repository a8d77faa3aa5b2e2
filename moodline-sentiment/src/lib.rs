//! Sentiment scoring for moodline.
//!
//! [`traits::SentimentScorer`] is the model-agnostic seam; [`vader::VaderScorer`]
//! is the production implementation, a lexicon-and-rule scorer tuned for the
//! short, informal text found on social media.

pub mod traits;
pub mod vader;

pub use traits::{ScoreError, SentimentScore, SentimentScorer};
pub use vader::VaderScorer;
