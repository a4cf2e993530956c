use crate::areas::history::{GitHistory, ROOT_PATH};
use crate::areas::pipeline::Pipeline;
use crate::artifacts::commit::record::Commit;
use crate::artifacts::filter::CommitsByPath;
use crate::artifacts::filter::flag_filter::{CommitHook, FlagFilter};
use colored::Colorize;
use std::io::Write;

#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    pub paths: Vec<String>,
    pub range: Option<String>,
    pub backfill: bool,
    pub oneline: bool,
}

impl Pipeline {
    pub async fn filter(&self, opts: &FilterOptions) -> anyhow::Result<()> {
        let commits_by_path = self.read_commits_by_path(opts).await?;

        let filter = FlagFilter::new(self.flag_set().clone(), self.reporter());
        let filtered = if opts.backfill {
            let history = GitHistory::new(self.log().clone(), self.reporter());
            run_hook(&filter.with_history(history), commits_by_path).await
        } else {
            run_hook(&filter, commits_by_path).await
        };

        self.display_commits_by_path(&filtered, opts)
    }

    async fn read_commits_by_path(&self, opts: &FilterOptions) -> anyhow::Result<CommitsByPath> {
        let paths = if opts.paths.is_empty() {
            vec![ROOT_PATH.to_string()]
        } else {
            opts.paths.clone()
        };

        let mut commits_by_path = CommitsByPath::new();
        for path in paths {
            let commits = self.log().read_commits(&path, opts.range.as_deref()).await?;
            commits_by_path.insert(path, commits);
        }

        Ok(commits_by_path)
    }

    fn display_commits_by_path(
        &self,
        commits_by_path: &CommitsByPath,
        opts: &FilterOptions,
    ) -> anyhow::Result<()> {
        for (path, commits) in commits_by_path {
            writeln!(
                self.writer(),
                "{} ({} commits)",
                format!("== {path}").bold(),
                commits.len()
            )?;

            for commit in commits {
                if opts.oneline {
                    self.show_commit_oneline(commit)?;
                } else {
                    self.show_commit_medium(commit)?;
                    writeln!(self.writer())?;
                }
            }
        }

        Ok(())
    }

    fn show_commit_medium(&self, commit: &Commit) -> anyhow::Result<()> {
        writeln!(self.writer(), "{}", format!("commit {}", commit.id()).yellow())?;
        if let Some(timestamp) = commit.timestamp() {
            writeln!(
                self.writer(),
                "Date:   {}",
                timestamp.format("%a %b %-d %H:%M:%S %Y %z")
            )?;
        }
        writeln!(self.writer())?;
        for message_line in commit.message().lines() {
            writeln!(self.writer(), "    {}", message_line)?;
        }

        Ok(())
    }

    fn show_commit_oneline(&self, commit: &Commit) -> anyhow::Result<()> {
        writeln!(
            self.writer(),
            "{} {}",
            commit.short_id().yellow(),
            commit.short_message()
        )?;

        Ok(())
    }
}

async fn run_hook(hook: &impl CommitHook, commits_by_path: CommitsByPath) -> CommitsByPath {
    hook.pre_process_commits(commits_by_path).await
}
