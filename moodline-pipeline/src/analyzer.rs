//! Orchestration of one full tabulation run.

use std::sync::Arc;

use moodline_sentiment::SentimentScorer;
use moodline_social::TimelineFetcher;

use crate::error::AnalyzeError;
use crate::record::SentimentRecord;
use crate::result::ResultSet;
use crate::walker::{DEFAULT_PAGE_SIZE, TimelineWalker};

/// Fetches, scores and tabulates timelines for a set of accounts.
///
/// Both collaborators come in behind trait objects, so the analyzer can run
/// against the live API and model or against scripted fakes.
pub struct TimelineAnalyzer {
    fetcher: Arc<dyn TimelineFetcher>,
    scorer: Arc<dyn SentimentScorer>,
    page_size: u32,
}

impl TimelineAnalyzer {
    pub fn new(fetcher: Arc<dyn TimelineFetcher>, scorer: Arc<dyn SentimentScorer>) -> Self {
        Self {
            fetcher,
            scorer,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Run one tabulation over `accounts`, pulling up to `cycles` pages per
    /// account.
    ///
    /// Work proceeds strictly in order: one account at a time, one page at
    /// a time, each post scored as it arrives. The first failure of any
    /// kind abandons the run and nothing partial escapes. An empty account
    /// list or zero cycles is not a failure, just an empty table.
    pub async fn run(&self, accounts: &[String], cycles: u32) -> Result<ResultSet, AnalyzeError> {
        let mut rows = Vec::new();

        for handle in accounts {
            let mut walker =
                TimelineWalker::new(self.fetcher.as_ref(), handle).with_page_size(self.page_size);
            let mut sequence: u32 = 0;
            let mut pages_fetched: u32 = 0;

            for _ in 0..cycles {
                let page = walker
                    .next_page()
                    .await
                    .map_err(|source| AnalyzeError::Fetch {
                        handle: handle.clone(),
                        source,
                    })?;
                let Some(page) = page else {
                    break;
                };
                pages_fetched += 1;

                for tweet in &page {
                    sequence += 1;
                    let score = self.scorer.score(&tweet.text)?;
                    rows.push(SentimentRecord::build(handle, sequence, tweet, score)?);
                }
            }

            tracing::info!(
                handle = %handle,
                pages = pages_fetched,
                posts = sequence,
                "account tabulated"
            );
        }

        tracing::info!(rows = rows.len(), accounts = accounts.len(), "run complete");
        Ok(ResultSet::from_rows(rows))
    }
}
