//! Commit records handed over by the release pipeline
//!
//! A commit carries its identifier, its full message and, when it was
//! merged through a change request, the request body. The body may hold an
//! override block that replaces the message for flag evaluation.
//!
//! ## Log format
//!
//! Commits read from git history use this layout per record:
//! ```text
//! <sha>\x1f<author date, strict ISO 8601>\x1f<raw body>\x1e
//! ```

use crate::artifacts::commit::marker::{FeatureMarker, override_block};
use anyhow::Context;
use derive_new::new;

/// `git log --format` string producing one record per commit
pub const LOG_FORMAT: &str = "%H%x1f%aI%x1f%B%x1e";

/// Separator between the fields of a record
pub const FIELD_SEPARATOR: char = '\x1f';

/// Separator between two records
pub const RECORD_SEPARATOR: char = '\x1e';

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Commit {
    id: String,
    message: String,
    #[new(default)]
    override_text: Option<String>,
    #[new(default)]
    timestamp: Option<chrono::DateTime<chrono::FixedOffset>>,
}

impl Commit {
    /// Attach a change-request body to the commit
    pub fn with_override(mut self, override_text: impl Into<String>) -> Self {
        self.override_text = Some(override_text.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: chrono::DateTime<chrono::FixedOffset>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn short_id(&self) -> &str {
        self.id.get(..7).unwrap_or(&self.id)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn short_message(&self) -> &str {
        self.message.lines().next().unwrap_or_default()
    }

    pub fn override_text(&self) -> Option<&str> {
        self.override_text.as_deref()
    }

    pub fn timestamp(&self) -> Option<chrono::DateTime<chrono::FixedOffset>> {
        self.timestamp
    }

    /// Text that decides the commit's feature flag
    ///
    /// The override block of the change-request body when there is a
    /// non-empty one, the raw message otherwise.
    pub fn inspected_text(&self) -> &str {
        self.override_text
            .as_deref()
            .and_then(override_block)
            .unwrap_or(&self.message)
    }

    pub fn feature_marker(&self) -> Option<FeatureMarker> {
        FeatureMarker::find(self.inspected_text())
    }

    /// Parse one record of `git log --format=LOG_FORMAT` output
    pub fn parse_log_record(record: &str) -> anyhow::Result<Self> {
        let record = record.trim_start_matches(['\n', '\r']);
        let mut fields = record.splitn(3, FIELD_SEPARATOR);

        let id = fields.next().unwrap_or_default().trim();
        if id.is_empty() || !id.chars().all(|c| c.is_ascii_hexdigit()) {
            anyhow::bail!("invalid commit id in log record: {:?}", id);
        }

        let date = fields
            .next()
            .with_context(|| format!("missing author date for commit {id}"))?;
        let message = fields
            .next()
            .with_context(|| format!("missing message for commit {id}"))?;

        let timestamp = chrono::DateTime::parse_from_rfc3339(date.trim())
            .with_context(|| format!("invalid author date for commit {id}: {date}"))?;

        Ok(Commit::new(id.to_string(), message.trim_end().to_string()).with_timestamp(timestamp))
    }

    /// Parse the full output of `git log --format=LOG_FORMAT`
    ///
    /// Blank records are skipped; the first malformed record aborts parsing.
    pub fn parse_log(output: &str) -> anyhow::Result<Vec<Self>> {
        output
            .split(RECORD_SEPARATOR)
            .filter(|record| !record.trim().is_empty())
            .map(Commit::parse_log_record)
            .collect()
    }
}
