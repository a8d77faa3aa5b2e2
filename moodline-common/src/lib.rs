//! Shared plumbing for the Moodline workspace.
//!
//! Currently this is only the [`observability`] module: every binary and
//! integration test initialises `tracing` through the same helper so log
//! output stays consistent across crates.

pub mod observability;
