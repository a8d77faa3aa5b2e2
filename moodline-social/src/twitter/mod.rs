//! Twitter v1.1 timeline client.

pub mod client;
pub mod types;

pub use client::TwitterTimelineApi;
pub use types::{TimelineUser, Tweet};
