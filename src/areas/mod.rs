//! Collaborators around the filter
//!
//! - `flags`: feature flag set read from the environment
//! - `history`: `git log` access and the history backfill lookup
//! - `pipeline`: local stand-in for the release pipeline used by the CLI
//! - `reporter`: injectable sinks for filter diagnostics

pub mod flags;
pub mod history;
pub mod pipeline;
pub mod reporter;
