//! Commit history access through the `git` executable
//!
//! This module provides:
//! - `GitLog`: reads commits for a path, optionally within a revision range
//! - `HistoryLookup`: the best-effort backfill collaborator of the filter
//! - `GitHistory`: a `HistoryLookup` searching the full history with `git log --grep`
//! - `NoHistory`: a `HistoryLookup` that never finds anything
//!
//! ## Backfill
//!
//! When a flag gets enabled, the commits that were hidden behind it in
//! earlier releases are only reachable through the full history. The
//! backfill looks them up so they can be released now. Any failure yields
//! no commits; it never aborts the filter.

use crate::areas::reporter::Reporter;
use crate::artifacts::commit::marker::FeatureMarker;
use crate::artifacts::commit::record::{Commit, LOG_FORMAT};
use crate::artifacts::filter::event::FilterEvent;
use anyhow::Context;
use derive_new::new;
use std::future::Future;
use std::path::Path;
use std::rc::Rc;

/// Path key that stands for the whole repository
pub const ROOT_PATH: &str = ".";

/// Best-effort source of historical commits for enabled flags
pub trait HistoryLookup {
    /// Commits under `path` whose marker names one of `flags`
    ///
    /// Never fails: errors are reported and yield an empty list.
    fn lookup_historical_commits(
        &self,
        flags: &[String],
        path: &str,
    ) -> impl Future<Output = Vec<Commit>>;
}

/// History lookup that never finds anything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHistory;

impl HistoryLookup for NoHistory {
    async fn lookup_historical_commits(&self, _flags: &[String], _path: &str) -> Vec<Commit> {
        Vec::new()
    }
}

/// Thin wrapper over `git log` for a repository on disk
#[derive(Debug, Clone, new)]
pub struct GitLog {
    repository: Box<Path>,
}

impl GitLog {
    /// Read the commits touching `path`, newest first
    ///
    /// # Arguments
    ///
    /// * `path` - Path inside the repository, `.` for the whole repository
    /// * `range` - Optional revision range such as `v1.0.0..HEAD`
    pub async fn read_commits(&self, path: &str, range: Option<&str>) -> anyhow::Result<Vec<Commit>> {
        let mut args = vec![format!("--format={LOG_FORMAT}")];
        if let Some(range) = range {
            args.push(range.to_string());
        }

        let output = self.run_log(&args, path).await?;
        Commit::parse_log(&output)
    }

    /// Search the full history of `path` for commits marked with any of `flags`
    pub async fn search_flags(&self, flags: &[String], path: &str) -> anyhow::Result<Vec<Commit>> {
        if flags.is_empty() {
            return Ok(Vec::new());
        }

        let patterns: Vec<String> = flags
            .iter()
            .filter(|flag| is_flag_name(flag))
            .map(|flag| format!("--grep={}", marker_pattern(flag)))
            .collect();
        if patterns.is_empty() {
            return Ok(Vec::new());
        }

        let mut args = vec![
            format!("--format={LOG_FORMAT}"),
            "-i".to_string(),
            "-E".to_string(),
        ];
        args.extend(patterns);

        let output = self.run_log(&args, path).await?;
        if output.trim().is_empty() {
            return Ok(Vec::new());
        }

        // `git log -i` also folds the flag name; keep exact-name matches only.
        Ok(Commit::parse_log(&output)?
            .into_iter()
            .filter(|commit| is_marked_with_any(commit, flags))
            .collect())
    }

    async fn run_log(&self, args: &[String], path: &str) -> anyhow::Result<String> {
        let output = tokio::process::Command::new("git")
            .arg("-C")
            .arg(self.repository.as_ref())
            .arg("log")
            .args(args)
            .arg("--")
            .arg(path)
            .output()
            .await
            .context("failed to run git log")?;

        if !output.status.success() {
            anyhow::bail!(
                "git log exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        String::from_utf8(output.stdout).context("git log produced invalid UTF-8")
    }
}

/// History lookup backed by `git log --grep`
#[derive(new)]
pub struct GitHistory {
    log: GitLog,
    reporter: Rc<dyn Reporter>,
}

impl HistoryLookup for GitHistory {
    async fn lookup_historical_commits(&self, flags: &[String], path: &str) -> Vec<Commit> {
        match self.log.search_flags(flags, path).await {
            Ok(commits) => commits,
            Err(err) => {
                self.reporter.record(&FilterEvent::HistoryLookupFailed {
                    path: path.to_string(),
                    reason: format!("{err:#}"),
                });
                Vec::new()
            }
        }
    }
}

/// Extended regex matching every spelling of the marker the filter accepts
pub fn marker_pattern(flag: &str) -> String {
    format!("Feature-Flag:[[:blank:]]*{flag}")
}

// Only word-character names can appear in a marker.
fn is_flag_name(flag: &str) -> bool {
    !flag.is_empty() && flag.chars().all(|c| c.is_alphanumeric() || c == '_')
}

/// Whether the commit carries a marker for one of the given flags
pub fn is_marked_with_any(commit: &Commit, flags: &[String]) -> bool {
    commit
        .feature_marker()
        .as_ref()
        .map(FeatureMarker::flag)
        .is_some_and(|flag| flags.iter().any(|candidate| candidate == flag))
}
