//! Terminal output helpers
//!
//! Command output goes through a `Box<dyn Write>`. On an interactive
//! terminal it is collected into a `minus` pager and shown once the command
//! is done; everywhere else it is written straight to stdout.

use is_terminal::IsTerminal;
use minus::Pager;
use std::io::{self, Write};

/// Environment variable that turns paging off
pub const NO_PAGER_ENV: &str = "NO_PAGER";

/// Adapts the minus pager to `std::io::Write`
pub struct PagerWriter {
    pager: Pager,
}

impl PagerWriter {
    pub fn new(pager: Pager) -> Self {
        Self { pager }
    }
}

impl Write for PagerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let s =
            std::str::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.pager.push_str(s).map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Destination of a command's output
pub enum CommandOutput {
    Paged(Pager),
    Plain,
}

impl CommandOutput {
    /// Page on a terminal unless `NO_PAGER` is set
    pub fn detect() -> Self {
        if std::env::var_os(NO_PAGER_ENV).is_none() && io::stdout().is_terminal() {
            CommandOutput::Paged(Pager::new())
        } else {
            CommandOutput::Plain
        }
    }

    pub fn writer(&self) -> Box<dyn Write> {
        match self {
            CommandOutput::Paged(pager) => Box::new(PagerWriter::new(pager.clone())),
            CommandOutput::Plain => Box::new(io::stdout()),
        }
    }

    /// Show the collected output, if it was paged
    pub fn finish(self) -> anyhow::Result<()> {
        match self {
            CommandOutput::Paged(pager) => {
                minus::page_all(pager)?;
                Ok(())
            }
            CommandOutput::Plain => Ok(()),
        }
    }
}
