//! Commit data and the filtering algorithm
//!
//! - `commit`: commit records, flag markers and override blocks
//! - `core`: shared output helpers (pager wrapper)
//! - `filter`: the feature flag filter and its diagnostics

pub mod commit;
pub mod core;
pub mod filter;
