//! Command implementations
//!
//! - `filter`: read commits per path, run the flag filter hook and print the survivors
//! - `flags`: list the feature flags found in the environment
//! - `check`: explain the decision for a single commit message
//!
//! Commands are methods on `Pipeline` and write through its writer.

pub mod check;
pub mod filter;
pub mod flags;
