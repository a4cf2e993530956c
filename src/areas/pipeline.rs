use crate::areas::flags::FlagSet;
use crate::areas::history::GitLog;
use crate::areas::reporter::Reporter;
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::io::Write;
use std::path::Path;
use std::rc::Rc;

/// Local stand-in for the release pipeline
///
/// Reads commits from a git repository, runs them through the flag filter
/// and writes the result to its writer.
pub struct Pipeline {
    log: GitLog,
    writer: RefCell<Box<dyn Write>>,
    flags: FlagSet,
    reporter: Rc<dyn Reporter>,
}

impl Pipeline {
    pub fn new(
        path: &str,
        writer: Box<dyn Write>,
        flags: FlagSet,
        reporter: Rc<dyn Reporter>,
    ) -> anyhow::Result<Self> {
        let path = Path::new(path)
            .canonicalize()
            .with_context(|| format!("repository path not found: {path}"))?;

        Ok(Pipeline {
            log: GitLog::new(path.into_boxed_path()),
            writer: RefCell::new(writer),
            flags,
            reporter,
        })
    }

    pub fn log(&self) -> &GitLog {
        &self.log
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn Write>> {
        self.writer.borrow_mut()
    }

    pub fn flag_set(&self) -> &FlagSet {
        &self.flags
    }

    pub fn reporter(&self) -> Rc<dyn Reporter> {
        self.reporter.clone()
    }
}
