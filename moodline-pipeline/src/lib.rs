//! The moodline tabulation pipeline.
//!
//! Walks a set of account timelines page by page, scores every post with a
//! sentiment model, and assembles the scored posts into one ordered table.
//! Ordering is deterministic: accounts in caller order, pages newest first,
//! posts in API order within each page.
//!
//! A run is all or nothing. The first fetch, scoring or timestamp failure
//! abandons the whole tabulation; partial tables are never returned.

pub mod analyzer;
pub mod error;
pub mod record;
pub mod result;
pub mod walker;

pub use analyzer::TimelineAnalyzer;
pub use error::AnalyzeError;
pub use record::SentimentRecord;
pub use result::{COLUMNS, ResultSet};
pub use walker::TimelineWalker;
