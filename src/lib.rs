//! Feature flag filtering for release pipelines
//!
//! Commits may carry a `Feature-Flag: <NAME>` marker in their message, or in
//! the override block of the change request that merged them. A marked
//! commit only makes it into a release when `FEATURE_<NAME>=true` is set in
//! the environment; unmarked commits always do.
//!
//! - `areas`: flag set, history access, reporting and the local pipeline
//! - `artifacts`: commit records, markers and the filter itself
//! - `commands`: CLI command implementations

pub mod areas;
pub mod artifacts;
pub mod commands;
