//! Execution context shared by the runner, resolver, and downloader
//!
//! The context carries the two pieces of state the core never owns
//! globally: the offline switch and the contract log sink. Both are
//! threaded explicitly into every call so embedding applications (and
//! tests) control them without process-wide statics.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Append-only, line-oriented log destination
///
/// The runner and downloader emit their contract progress lines through
/// this trait. Implementations must serialize individual line writes so
/// lines from concurrently executing tasks never interleave within a
/// line; no ordering across lines is imposed.
pub trait LogSink: Send + Sync {
    /// Append one line (without trailing newline) to the sink
    fn line(&self, text: &str);
}

/// Log sink writing through a locked standard output handle
#[derive(Debug, Default)]
pub struct StdoutSink;

impl LogSink for StdoutSink {
    fn line(&self, text: &str) {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        // A full stdout is not a build failure worth surfacing
        let _ = writeln!(handle, "{text}");
    }
}

/// Log sink collecting lines in memory, for log assertions in tests
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all lines appended so far, in append order
    pub fn lines(&self) -> Vec<String> {
        match self.lines.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Discard all collected lines
    pub fn clear(&self) {
        match self.lines.lock() {
            Ok(mut guard) => guard.clear(),
            Err(poisoned) => poisoned.into_inner().clear(),
        }
    }
}

impl LogSink for MemorySink {
    fn line(&self, text: &str) {
        match self.lines.lock() {
            Ok(mut guard) => guard.push(text.to_string()),
            Err(poisoned) => poisoned.into_inner().push(text.to_string()),
        }
    }
}

/// Shared execution context for one embedding of the core
///
/// Holds the offline flag and the log sink. The offline flag is read at
/// the time of each download call, so the embedding application may flip
/// it between calls.
pub struct Context {
    sink: Arc<dyn LogSink>,
    offline: AtomicBool,
}

impl Context {
    /// Create a context writing contract lines to the given sink, online
    ///
    /// The sink is shared: callers keep their own `Arc` when they need to
    /// read collected lines back (tests do).
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self {
            sink,
            offline: AtomicBool::new(false),
        }
    }

    /// Append one contract line to the sink
    pub fn log(&self, text: impl AsRef<str>) {
        self.sink.line(text.as_ref());
    }

    /// Whether offline mode is currently active
    pub fn offline(&self) -> bool {
        self.offline.load(Ordering::Relaxed)
    }

    /// Switch offline mode on or off
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::Relaxed);
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new(Arc::new(StdoutSink))
    }
}
