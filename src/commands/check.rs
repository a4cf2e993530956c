use crate::areas::pipeline::Pipeline;
use crate::artifacts::commit::marker::override_block;
use crate::artifacts::commit::record::Commit;
use crate::artifacts::filter::flag_filter::FlagFilter;
use colored::Colorize;
use std::io::Write;

impl Pipeline {
    /// Explain whether a single commit would survive the filter
    pub fn check(&self, message: &str, override_text: Option<&str>) -> anyhow::Result<()> {
        let mut commit = Commit::new(String::new(), message.to_string());
        if let Some(override_text) = override_text {
            commit = commit.with_override(override_text);
        }

        let source = if commit.override_text().and_then(override_block).is_some() {
            "override block"
        } else {
            "message"
        };

        let filter = FlagFilter::new(self.flag_set().clone(), self.reporter());

        match (commit.feature_marker(), filter.keeps(&commit)) {
            (None, _) => writeln!(self.writer(), "{} no feature flag in {source}", "kept:".green())?,
            (Some(marker), true) => writeln!(
                self.writer(),
                "{} flag {marker} is enabled ({source})",
                "kept:".green()
            )?,
            (Some(marker), false) => {
                let reason = if self.flag_set().is_known_disabled(marker.flag()) {
                    "is disabled"
                } else {
                    "is not enabled"
                };
                writeln!(
                    self.writer(),
                    "{} flag {marker} {reason} ({source})",
                    "dropped:".red()
                )?
            }
        }

        Ok(())
    }
}
