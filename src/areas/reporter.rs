//! Diagnostic reporting
//!
//! The filter never prints on its own. Every diagnostic goes through a
//! `Reporter`, so callers pick the destination and tests can inspect what
//! was recorded.

use crate::artifacts::filter::event::FilterEvent;
use is_terminal::IsTerminal;
use std::cell::RefCell;
use std::io::Write;

/// Sink for filter diagnostics
pub trait Reporter {
    fn record(&self, event: &FilterEvent);
}

/// Writes one line per event to the wrapped writer
pub struct WriterReporter {
    writer: RefCell<Box<dyn Write>>,
    color: bool,
}

impl WriterReporter {
    pub fn new(writer: Box<dyn Write>, color: bool) -> Self {
        Self {
            writer: RefCell::new(writer),
            color,
        }
    }

    /// Report to stderr, coloured only when stderr is a terminal
    pub fn stderr() -> Self {
        let stderr = std::io::stderr();
        let color = stderr.is_terminal();
        Self::new(Box::new(stderr), color)
    }
}

impl Reporter for WriterReporter {
    fn record(&self, event: &FilterEvent) {
        // Diagnostics are best-effort; a closed stream must not fail the filter.
        let _ = if self.color {
            writeln!(self.writer.borrow_mut(), "{event}")
        } else {
            writeln!(self.writer.borrow_mut(), "{event:#}")
        };
    }
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn record(&self, _event: &FilterEvent) {}
}

/// Keeps every event in memory
#[derive(Debug, Default)]
pub struct MemoryReporter {
    events: RefCell<Vec<FilterEvent>>,
}

impl MemoryReporter {
    pub fn events(&self) -> Vec<FilterEvent> {
        self.events.borrow().clone()
    }
}

impl Reporter for MemoryReporter {
    fn record(&self, event: &FilterEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn writer_reporter_writes_lines() {
        let buffer = SharedBuffer::default();
        let reporter = WriterReporter::new(Box::new(buffer.clone()), false);

        reporter.record(&FilterEvent::HistoryBackfilled {
            path: "web".to_string(),
            added: 2,
        });

        let written = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert_eq!(written, "backfill: web: added 2 commits from history\n");
    }

    #[test]
    fn memory_reporter_shared_through_rc() {
        let reporter = Rc::new(MemoryReporter::default());
        let shared: Rc<dyn Reporter> = reporter.clone();

        shared.record(&FilterEvent::PathFiltered {
            path: ".".to_string(),
            before: 1,
            after: 1,
        });

        assert_eq!(reporter.events().len(), 1);
    }
}
