use colored::Colorize;

/// Diagnostic emitted while filtering commits
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEvent {
    /// A path was filtered
    PathFiltered {
        path: String,
        before: usize,
        after: usize,
    },
    /// A commit was dropped because its flag is not enabled
    CommitDropped {
        path: String,
        id: String,
        flag: String,
        /// The flag was explicitly set to `false`
        known_disabled: bool,
    },
    /// Commits for enabled flags were pulled in from history
    HistoryBackfilled { path: String, added: usize },
    /// The history lookup failed and contributed no commits
    HistoryLookupFailed { path: String, reason: String },
}

impl FilterEvent {
    pub fn path(&self) -> &str {
        match self {
            FilterEvent::PathFiltered { path, .. }
            | FilterEvent::CommitDropped { path, .. }
            | FilterEvent::HistoryBackfilled { path, .. }
            | FilterEvent::HistoryLookupFailed { path, .. } => path,
        }
    }

    fn label(&self) -> colored::ColoredString {
        match self {
            FilterEvent::PathFiltered { .. } => "filtered".cyan(),
            FilterEvent::CommitDropped { .. } => "dropped".yellow(),
            FilterEvent::HistoryBackfilled { .. } => "backfill".green(),
            FilterEvent::HistoryLookupFailed { .. } => "warning".red(),
        }
    }
}

impl std::fmt::Display for FilterEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // `{:#}` drops the colour from the label.
        if f.alternate() {
            write!(f, "{}: ", self.label().clear())?;
        } else {
            write!(f, "{}: ", self.label())?;
        }

        match self {
            FilterEvent::PathFiltered {
                path,
                before,
                after,
            } => write!(f, "{path}: kept {after} of {before} commits"),
            FilterEvent::CommitDropped {
                path,
                id,
                flag,
                known_disabled,
            } => {
                let reason = if *known_disabled {
                    "disabled"
                } else {
                    "not enabled"
                };
                write!(f, "{path}: {id} (flag {flag} {reason})")
            }
            FilterEvent::HistoryBackfilled { path, added } => {
                write!(f, "{path}: added {added} commits from history")
            }
            FilterEvent::HistoryLookupFailed { path, reason } => {
                write!(f, "{path}: history lookup failed: {reason}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn display_is_one_line_per_event() {
        colored::control::set_override(false);

        let dropped = FilterEvent::CommitDropped {
            path: "packages/api".to_string(),
            id: "abc1234".to_string(),
            flag: "SEARCH".to_string(),
            known_disabled: true,
        };
        let filtered = FilterEvent::PathFiltered {
            path: ".".to_string(),
            before: 3,
            after: 2,
        };

        assert_eq!(
            dropped.to_string(),
            "dropped: packages/api: abc1234 (flag SEARCH disabled)"
        );
        assert_eq!(filtered.to_string(), "filtered: .: kept 2 of 3 commits");
        assert_eq!(dropped.path(), "packages/api");
    }

    #[test]
    fn alternate_display_has_no_escape_codes() {
        let failed = FilterEvent::HistoryLookupFailed {
            path: "web".to_string(),
            reason: "git log exited with 128".to_string(),
        };

        assert_eq!(
            format!("{failed:#}"),
            "warning: web: history lookup failed: git log exited with 128"
        );
    }
}
