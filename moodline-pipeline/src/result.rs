//! The assembled output table.

use serde::Serialize;

use crate::record::SentimentRecord;

/// Column order of the rendered table. Matches the field order of
/// [`SentimentRecord`].
pub const COLUMNS: [&str; 9] = [
    "handle",
    "sequence",
    "timestamp",
    "id",
    "compound",
    "positive",
    "neutral",
    "negative",
    "text",
];

/// Ordered table of scored posts.
///
/// Row order is fully determined by the input: accounts in caller order,
/// pages newest first within an account, posts in API order within a page.
/// Serializes as a plain array of rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResultSet {
    rows: Vec<SentimentRecord>,
}

impl ResultSet {
    pub(crate) fn from_rows(rows: Vec<SentimentRecord>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[SentimentRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SentimentRecord> {
        self.rows.iter()
    }
}

impl FromIterator<SentimentRecord> for ResultSet {
    fn from_iter<I: IntoIterator<Item = SentimentRecord>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a SentimentRecord;
    type IntoIter = std::slice::Iter<'a, SentimentRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl IntoIterator for ResultSet {
    type Item = SentimentRecord;
    type IntoIter = std::vec::IntoIter<SentimentRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}
