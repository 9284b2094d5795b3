//! Per-search state passed explicitly into the planner.
//!
//! A [`SearchContext`] bundles the cancellation flag polled between
//! scenarios and the sink that collects user-facing progress messages.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cooperative cancellation flag shared between a search and its owner.
///
/// Clones observe the same flag.
///
/// # Examples
/// ```
/// use tripweave_core::CancellationToken;
///
/// let token = CancellationToken::new();
/// let handle = token.clone();
/// handle.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// A token that has not been cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Clear a previous request so the token can be reused.
    pub fn reset(&self) {
        self.cancelled.store(false, Ordering::Relaxed);
    }
}

/// Receives short progress messages meant for the person running a search.
pub trait SearchLog {
    /// Record one message.
    fn record(&mut self, message: String);
}

/// Keeps every message in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryLog {
    entries: Vec<String>,
}

impl MemoryLog {
    /// An empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Messages in the order they were recorded.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Drop every message.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl SearchLog for MemoryLog {
    fn record(&mut self, message: String) {
        self.entries.push(message);
    }
}

/// Discards every message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullLog;

impl SearchLog for NullLog {
    fn record(&mut self, _message: String) {}
}

/// Cancellation and logging for one search.
pub struct SearchContext<'a> {
    cancel: CancellationToken,
    log: &'a mut dyn SearchLog,
}

impl<'a> SearchContext<'a> {
    /// Bundle a token and a log sink.
    #[must_use]
    pub const fn new(cancel: CancellationToken, log: &'a mut dyn SearchLog) -> Self {
        Self { cancel, log }
    }

    /// Whether the owner asked the search to stop.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Record a progress message, mirroring it to the `log` facade.
    pub fn note(&mut self, message: impl Into<String>) {
        let text = message.into();
        log::info!("{text}");
        self.log.record(text);
    }
}

impl std::fmt::Debug for SearchContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchContext")
            .field("cancel", &self.cancel)
            .finish_non_exhaustive()
    }
}
