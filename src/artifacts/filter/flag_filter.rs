use crate::areas::flags::FlagSet;
use crate::areas::history::{HistoryLookup, NoHistory};
use crate::areas::reporter::Reporter;
use crate::artifacts::commit::record::Commit;
use crate::artifacts::filter::CommitsByPath;
use crate::artifacts::filter::event::FilterEvent;
use std::collections::{BTreeMap, HashSet};
use std::future::Future;
use std::rc::Rc;

/// Extension point the release pipeline calls before strategies consume commits
pub trait CommitHook {
    fn pre_process_commits(
        &self,
        commits_by_path: CommitsByPath,
    ) -> impl Future<Output = CommitsByPath>;
}

/// Drops commits whose feature flag is not enabled
pub struct FlagFilter<H = NoHistory> {
    flags: FlagSet,
    reporter: Rc<dyn Reporter>,
    history: Option<H>,
}

impl FlagFilter<NoHistory> {
    pub fn new(flags: FlagSet, reporter: Rc<dyn Reporter>) -> Self {
        Self {
            flags,
            reporter,
            history: None,
        }
    }
}

impl<H: HistoryLookup> FlagFilter<H> {
    /// Backfill commits for enabled flags from history before filtering
    pub fn with_history<L: HistoryLookup>(self, history: L) -> FlagFilter<L> {
        FlagFilter {
            flags: self.flags,
            reporter: self.reporter,
            history: Some(history),
        }
    }

    /// Whether a commit survives filtering
    ///
    /// Unmarked commits are always kept. Marked commits are kept only when
    /// their flag is enabled.
    pub fn keeps(&self, commit: &Commit) -> bool {
        match commit.feature_marker() {
            Some(marker) => self.flags.is_enabled(marker.flag()),
            None => true,
        }
    }

    /// Filter every path independently, keeping the relative commit order
    ///
    /// Path keys are preserved even when all of their commits are dropped.
    pub fn filter(&self, commits_by_path: CommitsByPath) -> CommitsByPath {
        commits_by_path
            .into_iter()
            .map(|(path, commits)| {
                let commits = self.filter_path(&path, commits);
                (path, commits)
            })
            .collect()
    }

    /// Filter only the paths that have a release strategy
    ///
    /// Paths without a strategy are returned untouched, and the strategies
    /// themselves are only read.
    pub fn filter_with_strategies<S>(
        &self,
        commits_by_path: CommitsByPath,
        strategies: &BTreeMap<String, S>,
    ) -> CommitsByPath {
        commits_by_path
            .into_iter()
            .map(|(path, commits)| {
                if strategies.contains_key(&path) {
                    let commits = self.filter_path(&path, commits);
                    (path, commits)
                } else {
                    (path, commits)
                }
            })
            .collect()
    }

    /// Hook variant for pipelines that hand over their release strategies too
    pub async fn pre_process_with_strategies<S>(
        &self,
        commits_by_path: CommitsByPath,
        strategies: &BTreeMap<String, S>,
    ) -> CommitsByPath {
        let commits_by_path = self.backfill(commits_by_path, Some(strategies)).await;
        self.filter_with_strategies(commits_by_path, strategies)
    }

    fn filter_path(&self, path: &str, commits: Vec<Commit>) -> Vec<Commit> {
        let before = commits.len();

        let kept: Vec<Commit> = commits
            .into_iter()
            .filter(|commit| {
                if self.keeps(commit) {
                    return true;
                }

                if let Some(marker) = commit.feature_marker() {
                    self.reporter.record(&FilterEvent::CommitDropped {
                        path: path.to_string(),
                        id: commit.short_id().to_string(),
                        flag: marker.flag().to_string(),
                        known_disabled: self.flags.is_known_disabled(marker.flag()),
                    });
                }
                false
            })
            .collect();

        self.reporter.record(&FilterEvent::PathFiltered {
            path: path.to_string(),
            before,
            after: kept.len(),
        });

        kept
    }

    async fn backfill<S>(
        &self,
        mut commits_by_path: CommitsByPath,
        strategies: Option<&BTreeMap<String, S>>,
    ) -> CommitsByPath {
        let Some(history) = &self.history else {
            return commits_by_path;
        };

        let flags: Vec<String> = self.flags.enabled().map(str::to_string).collect();
        if flags.is_empty() {
            return commits_by_path;
        }

        for (path, commits) in commits_by_path.iter_mut() {
            if strategies.is_some_and(|strategies| !strategies.contains_key(path)) {
                continue;
            }

            let found = history.lookup_historical_commits(&flags, path).await;
            let added = merge_unseen(commits, found);
            if added > 0 {
                self.reporter.record(&FilterEvent::HistoryBackfilled {
                    path: path.clone(),
                    added,
                });
            }
        }

        commits_by_path
    }
}

impl<H: HistoryLookup> CommitHook for FlagFilter<H> {
    async fn pre_process_commits(&self, commits_by_path: CommitsByPath) -> CommitsByPath {
        let commits_by_path = self.backfill::<()>(commits_by_path, None).await;
        self.filter(commits_by_path)
    }
}

/// Append the commits whose id is not in `commits` yet
///
/// # Returns
///
/// Number of commits appended
fn merge_unseen(commits: &mut Vec<Commit>, found: Vec<Commit>) -> usize {
    let mut seen: HashSet<String> = commits.iter().map(|commit| commit.id().to_string()).collect();
    let before = commits.len();

    for commit in found {
        if seen.insert(commit.id().to_string()) {
            commits.push(commit);
        }
    }

    commits.len() - before
}
