//! Wire types for the Twitter v1.1 statuses API.
//!
//! Only the fields the pipeline consumes are modelled. Everything else in
//! the (large) status payload is ignored during deserialization.

use serde::{Deserialize, Serialize};

/// A single status from `1.1/statuses/user_timeline.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tweet {
    /// Numeric snowflake id. Unique per post and monotonically increasing
    /// over time, so it doubles as a pagination key.
    pub id: u64,

    /// String form of `id`, as sent by the API. Kept for callers that need
    /// ids above JavaScript's safe-integer range verbatim.
    #[serde(default)]
    pub id_str: Option<String>,

    /// Post body.
    pub text: String,

    /// Creation time in Twitter's legacy format,
    /// e.g. `Wed Oct 10 20:19:24 +0000 2018`.
    pub created_at: String,

    /// Author, when the endpoint includes it.
    #[serde(default)]
    pub user: Option<TimelineUser>,

    /// BCP 47 language guess from Twitter.
    #[serde(default)]
    pub lang: Option<String>,

    #[serde(default)]
    pub truncated: Option<bool>,

    #[serde(default)]
    pub retweet_count: Option<u64>,

    #[serde(default)]
    pub favorite_count: Option<u64>,
}

/// The author object embedded in a timeline status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineUser {
    pub id: u64,

    /// Handle without the leading `@`.
    pub screen_name: String,

    #[serde(default)]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_a_minimal_status() {
        let raw = r#"{
            "id": 1050118621198921700,
            "id_str": "1050118621198921728",
            "text": "To make room for more expression, we will now count all emojis as equal.",
            "created_at": "Wed Oct 10 20:19:24 +0000 2018",
            "user": {"id": 2244994945, "screen_name": "TwitterDev", "name": "Twitter Dev"},
            "lang": "en"
        }"#;

        let tweet: Tweet = serde_json::from_str(raw).expect("valid status json");
        assert_eq!(tweet.id, 1050118621198921700);
        assert_eq!(tweet.id_str.as_deref(), Some("1050118621198921728"));
        assert_eq!(tweet.created_at, "Wed Oct 10 20:19:24 +0000 2018");
        assert_eq!(tweet.user.unwrap().screen_name, "TwitterDev");
        assert!(tweet.retweet_count.is_none());
    }

    #[test]
    fn ignores_unmodelled_fields() {
        let raw = r#"{
            "id": 7,
            "text": "hello",
            "created_at": "Mon Jan 01 00:00:00 +0000 2024",
            "entities": {"hashtags": []},
            "favorited": false
        }"#;

        let tweet: Tweet = serde_json::from_str(raw).expect("extra fields tolerated");
        assert_eq!(tweet.id, 7);
        assert!(tweet.user.is_none());
    }
}
