//! Cursor-based pagination over a single account's timeline.

use moodline_social::twitter::types::Tweet;
use moodline_social::{SocialError, TimelineFetcher};

/// Posts requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Pagination state machine for one account.
///
/// Pages arrive newest first. After each non-empty page the cursor moves to
/// one below the smallest id seen, so the next page holds strictly older
/// posts and nothing is fetched twice. An empty page marks the timeline
/// exhausted; the walker stays exhausted from then on.
///
/// Each walker owns its cursor outright. Walking one account never affects
/// where another account's walk starts.
pub struct TimelineWalker<'a> {
    fetcher: &'a dyn TimelineFetcher,
    handle: &'a str,
    page_size: u32,
    cursor: Option<u64>,
    exhausted: bool,
}

impl<'a> TimelineWalker<'a> {
    pub fn new(fetcher: &'a dyn TimelineFetcher, handle: &'a str) -> Self {
        Self {
            fetcher,
            handle,
            page_size: DEFAULT_PAGE_SIZE,
            cursor: None,
            exhausted: false,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Upper id bound the next fetch will use. `None` while the first page
    /// is still unbounded.
    pub fn cursor(&self) -> Option<u64> {
        self.cursor
    }

    /// Fetch the next page, newest first.
    ///
    /// Returns `Ok(None)` once the timeline is exhausted. A short but
    /// non-empty page does not exhaust the walk; only an empty page does.
    pub async fn next_page(&mut self) -> Result<Option<Vec<Tweet>>, SocialError> {
        if self.exhausted {
            return Ok(None);
        }

        let page = self
            .fetcher
            .fetch(self.handle, self.page_size, self.cursor)
            .await?;

        match page.iter().map(|tweet| tweet.id).min() {
            Some(min_id) => {
                // Ids are unique within a timeline, so one below the
                // smallest id excludes exactly this page from the next
                // fetch. Pages are not assumed sorted.
                self.cursor = Some(min_id.saturating_sub(1));
            }
            None => {
                self.exhausted = true;
                return Ok(None);
            }
        }

        Ok(Some(page))
    }

    /// Fetch up to `pages` pages, in fetch order. Stops early when the
    /// timeline runs out.
    pub async fn fetch_pages(&mut self, pages: u32) -> Result<Vec<Vec<Tweet>>, SocialError> {
        let mut collected = Vec::new();
        for _ in 0..pages {
            match self.next_page().await? {
                Some(page) => collected.push(page),
                None => break,
            }
        }
        Ok(collected)
    }
}
