//! VADER-backed implementation of [`SentimentScorer`].

use vader_sentiment::SentimentIntensityAnalyzer;

use crate::traits::{ScoreError, SentimentScore, SentimentScorer};

/// Lexicon-and-rule sentiment scorer.
///
/// Construction loads the lexicon, which is not free. Build one and share
/// it for the lifetime of a run.
pub struct VaderScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl VaderScorer {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }
}

impl Default for VaderScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentScorer for VaderScorer {
    fn score(&self, text: &str) -> Result<SentimentScore, ScoreError> {
        let raw = self.analyzer.polarity_scores(text);
        let component = |key: &'static str| raw.get(key).copied().ok_or(ScoreError::Malformed(key));

        Ok(SentimentScore {
            compound: component("compound")?,
            positive: component("pos")?,
            neutral: component("neu")?,
            negative: component("neg")?,
        })
    }
}
