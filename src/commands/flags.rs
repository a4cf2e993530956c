use crate::areas::flags::FLAG_ENV_PREFIX;
use crate::areas::pipeline::Pipeline;
use colored::Colorize;
use std::io::Write;

impl Pipeline {
    /// List enabled and known-disabled flags, sorted by name
    pub fn flags(&self) -> anyhow::Result<()> {
        let flags = self.flag_set();

        if flags.is_empty() {
            writeln!(
                self.writer(),
                "No feature flags set (expected {FLAG_ENV_PREFIX}<NAME>=true|false)"
            )?;
            return Ok(());
        }

        for name in flags.enabled() {
            writeln!(self.writer(), "{} {}", "enabled: ".green(), name)?;
        }
        for name in flags.seen_disabled() {
            writeln!(self.writer(), "{} {}", "disabled:".red(), name)?;
        }

        Ok(())
    }
}
