//! Feature flag filtering of commit lists
//!
//! - `flag_filter`: the filter and the pipeline hook it implements
//! - `event`: diagnostics recorded while filtering
//!
//! Commits are grouped by path (a sub-project directory, `.` for the whole
//! repository). Each path is filtered on its own and keeps its commit order.

use crate::artifacts::commit::record::Commit;
use std::collections::BTreeMap;

pub mod event;
pub mod flag_filter;

/// Commits per path, in the order the pipeline handed them over
pub type CommitsByPath = BTreeMap<String, Vec<Commit>>;
