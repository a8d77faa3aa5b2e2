//! Social media timeline access for moodline.
//!
//! The [`traits::TimelineFetcher`] trait is the seam the analysis pipeline
//! depends on. [`twitter::TwitterTimelineApi`] is the production
//! implementation, backed by the Twitter v1.1 user timeline endpoint.

pub mod traits;
pub mod twitter;

pub use traits::{SocialError, TimelineFetcher};
pub use twitter::TwitterTimelineApi;
