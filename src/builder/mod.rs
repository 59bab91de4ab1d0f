//! Builder API for tracker construction.
//!
//! The builder collects the tracked symbol, table and options, validates
//! them once, and hands out a tracker that can no longer hit a table
//! defect at runtime.

pub mod error;

pub use error::BuildError;

use crate::classify::EventClassifier;
use crate::config::{ElifPolicy, TrackerConfig};
use crate::core::{TrackerState, TransitionHistory};
use crate::sink::ActionSink;
use crate::table::TransitionTable;
use crate::tracker::RegionTracker;
use std::sync::Arc;

/// Builder for constructing trackers with a fluent API.
///
/// # Example
///
/// ```rust
/// use pp_region::builder::TrackerBuilder;
/// use pp_region::core::Event;
/// use pp_region::sink::RecordingSink;
///
/// let mut tracker = TrackerBuilder::new()
///     .symbol("ENABLE_LOGGING")
///     .record_history(true)
///     .build(RecordingSink::new())
///     .unwrap();
///
/// tracker.process(Event::MatchFalse);
/// tracker.process(Event::Close);
/// assert_eq!(tracker.history().map(|h| h.len()), Some(2));
/// ```
#[derive(Debug, Default)]
pub struct TrackerBuilder {
    symbol: Option<String>,
    table: Option<Arc<TransitionTable>>,
    record_history: bool,
    elif_policy: ElifPolicy,
}

impl TrackerBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tracked symbol (required).
    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// Use a custom transition table instead of the standard one.
    pub fn table(mut self, table: TransitionTable) -> Self {
        self.table = Some(Arc::new(table));
        self
    }

    /// Share one table between several trackers.
    pub fn shared_table(mut self, table: Arc<TransitionTable>) -> Self {
        self.table = Some(table);
        self
    }

    /// Record every matched transition (default off).
    pub fn record_history(mut self, enabled: bool) -> Self {
        self.record_history = enabled;
        self
    }

    /// Set how `#elif` is classified.
    pub fn elif_policy(mut self, policy: ElifPolicy) -> Self {
        self.elif_policy = policy;
        self
    }

    /// Apply every field of a configuration.
    pub fn config(mut self, config: TrackerConfig) -> Self {
        self.symbol = Some(config.symbol);
        self.record_history = config.record_history;
        self.elif_policy = config.elif_policy;
        self
    }

    /// Build the tracker around a sink.
    /// Returns an error if the symbol is missing or malformed, or if the
    /// table fails validation.
    pub fn build<K: ActionSink>(self, sink: K) -> Result<RegionTracker<K>, BuildError> {
        let symbol = self
            .symbol
            .filter(|s| !s.is_empty())
            .ok_or(BuildError::MissingSymbol)?;
        if !is_identifier(&symbol) {
            return Err(BuildError::InvalidSymbol(symbol));
        }

        let table = self
            .table
            .unwrap_or_else(|| Arc::new(TransitionTable::standard()));
        table.check().map_err(BuildError::InvalidTable)?;

        let classifier = EventClassifier::new(symbol).with_elif_policy(self.elif_policy);
        let history = self.record_history.then(TransitionHistory::new);

        Ok(RegionTracker::from_parts(
            classifier,
            table,
            TrackerState::default(),
            sink,
            history,
        ))
    }
}

/// True for a C macro identifier: `[A-Za-z_][A-Za-z0-9_]*`.
pub(crate) fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
