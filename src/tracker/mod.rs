//! The region tracker: a pushdown automaton driven by directive events.

mod error;

pub use error::TrackerError;

use crate::builder::{BuildError, TrackerBuilder};
use crate::classify::{Directive, EventClassifier};
use crate::core::{
    Action, Event, RegionState, TrackerState, TransitionHistory, TransitionRecord,
};
use crate::sink::ActionSink;
use crate::table::{Row, Selection, TransitionTable};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Tracks the kept regions of conditionals on one symbol.
///
/// Feed it one event per conditional directive, in source order. Each
/// matched transition runs its actions against the sink; events with no
/// matching row change nothing.
///
/// # Example
///
/// ```rust
/// use pp_region::core::{Action, Event, RegionState};
/// use pp_region::sink::RecordingSink;
/// use pp_region::tracker::RegionTracker;
///
/// let mut tracker = RegionTracker::new("TEST_PP_CONDITIONAL", RecordingSink::new()).unwrap();
/// tracker.process_all([Event::MatchTrue, Event::Close]);
///
/// assert_eq!(tracker.state(), RegionState::Inactive);
/// let sink = tracker.finish().unwrap();
/// assert_eq!(
///     sink.calls(),
///     &[Action::Push, Action::BeginRegion, Action::Pop, Action::EndRegion]
/// );
/// ```
#[derive(Debug)]
pub struct RegionTracker<K: ActionSink> {
    classifier: EventClassifier,
    table: Arc<TransitionTable>,
    current: TrackerState,
    sink: K,
    position: usize,
    unmatched: usize,
    history: Option<TransitionHistory>,
}

impl<K: ActionSink> RegionTracker<K> {
    /// Create a tracker for `symbol` using the standard table.
    pub fn new(symbol: impl Into<String>, sink: K) -> Result<Self, BuildError> {
        TrackerBuilder::new().symbol(symbol).build(sink)
    }

    /// Assemble a tracker from already-validated parts.
    pub(crate) fn from_parts(
        classifier: EventClassifier,
        table: Arc<TransitionTable>,
        current: TrackerState,
        sink: K,
        history: Option<TransitionHistory>,
    ) -> Self {
        Self {
            classifier,
            table,
            current,
            sink,
            position: 0,
            unmatched: 0,
            history,
        }
    }

    pub(crate) fn set_counters(&mut self, position: usize, unmatched: usize) {
        self.position = position;
        self.unmatched = unmatched;
    }

    /// Consume one event.
    ///
    /// # Panics
    ///
    /// Panics if the table offers competing rows that do not resolve to
    /// exactly one. Tables built through [`TrackerBuilder`] are validated
    /// against this up front.
    pub fn process(&mut self, event: Event) {
        let position = self.position;
        self.position += 1;

        let table = Arc::clone(&self.table);
        let TrackerState { state, depth } = self.current;
        match table.select(state, event, depth) {
            Selection::Row(row) => self.fire(position, event, row),
            Selection::Unmatched => self.no_transition(event),
            Selection::Ambiguous { matched } => panic!(
                "transition table is ambiguous: {matched} rows matched {state} + {event} at depth {depth}"
            ),
        }
    }

    /// Consume a sequence of events in order.
    pub fn process_all<I>(&mut self, events: I)
    where
        I: IntoIterator<Item = Event>,
    {
        for event in events {
            self.process(event);
        }
    }

    /// Classify a directive and process the resulting event.
    ///
    /// A conditional on the tracked symbol nested inside one of its own
    /// regions is counted as an unrelated `Open`, so its `#endif` does not
    /// close the outer region. Returns the event processed, or `None` when
    /// the directive was dropped by the classifier.
    pub fn process_directive(
        &mut self,
        directive: Directive,
        expression: &str,
        value: bool,
    ) -> Option<Event> {
        let event = match self.classifier.classify(directive, expression, value)? {
            Event::MatchTrue | Event::MatchFalse if self.current.state.in_region() => Event::Open,
            event => event,
        };
        self.process(event);
        Some(event)
    }

    fn fire(&mut self, position: usize, event: Event, row: &Row) {
        let from = self.current.state;
        for action in &row.actions {
            match action {
                Action::Push => self.current.depth += 1,
                Action::Pop => {
                    debug_assert!(self.current.depth > 0, "pop at depth 0");
                    self.current.depth = self.current.depth.saturating_sub(1);
                }
                _ => {}
            }
            self.sink.apply(*action);
        }
        self.current.state = row.to;

        debug!(
            symbol = %self.classifier.symbol(),
            position,
            %event,
            %from,
            to = %row.to,
            depth = self.current.depth,
            "transition"
        );

        if let Some(history) = self.history.as_mut() {
            history.push(TransitionRecord {
                position,
                event,
                from,
                to: row.to,
                depth: self.current.depth,
                actions: row.actions.clone(),
            });
        }
    }

    /// Called when no row matches. Leaves state, depth and sink untouched.
    fn no_transition(&mut self, event: Event) {
        self.unmatched += 1;
        trace!(
            symbol = %self.classifier.symbol(),
            position = self.position - 1,
            %event,
            state = %self.current.state,
            depth = self.current.depth,
            "no transition"
        );
    }

    /// Check that the stream may end here.
    pub fn check_complete(&self) -> Result<(), TrackerError> {
        if self.current.is_complete() {
            Ok(())
        } else {
            Err(TrackerError::UnterminatedRegion {
                symbol: self.classifier.symbol().to_string(),
                state: self.current.state,
                depth: self.current.depth,
            })
        }
    }

    /// End the scan, returning the sink if every region was closed.
    pub fn finish(self) -> Result<K, TrackerError> {
        if let Err(err) = self.check_complete() {
            warn!(symbol = %self.classifier.symbol(), "{err}");
            return Err(err);
        }
        Ok(self.sink)
    }

    /// Give up the sink without the end-of-stream check.
    pub fn into_sink(self) -> K {
        self.sink
    }

    pub fn state(&self) -> RegionState {
        self.current.state
    }

    pub fn depth(&self) -> usize {
        self.current.depth
    }

    pub fn tracker_state(&self) -> TrackerState {
        self.current
    }

    pub fn symbol(&self) -> &str {
        self.classifier.symbol()
    }

    pub fn classifier(&self) -> &EventClassifier {
        &self.classifier
    }

    pub fn table(&self) -> &Arc<TransitionTable> {
        &self.table
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut K {
        &mut self.sink
    }

    /// Transition history, if recording was enabled.
    pub fn history(&self) -> Option<&TransitionHistory> {
        self.history.as_ref()
    }

    /// Number of events processed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of events that matched no row.
    pub fn unmatched_events(&self) -> usize {
        self.unmatched
    }
}
