//! Transition history tracking.
//!
//! When enabled on a tracker, every matched transition is recorded in
//! order, which makes it possible to audit how a scan reached its final
//! state or to persist that trail in a checkpoint.

use super::state::{Action, Event, RegionState};
use serde::{Deserialize, Serialize};

/// Record of a single matched transition.
///
/// # Example
///
/// ```rust
/// use pp_region::core::{Action, Event, RegionState, TransitionRecord};
///
/// let record = TransitionRecord {
///     position: 0,
///     event: Event::MatchTrue,
///     from: RegionState::Inactive,
///     to: RegionState::TrueRegion,
///     depth: 1,
///     actions: vec![Action::Push, Action::BeginRegion],
/// };
/// assert!(record.changed_state());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Zero-based index of the event in the stream
    pub position: usize,
    /// The event that triggered the transition
    pub event: Event,
    /// The state being transitioned from
    pub from: RegionState,
    /// The state being transitioned to
    pub to: RegionState,
    /// Depth after the actions ran
    pub depth: usize,
    /// Actions fired, in order
    pub actions: Vec<Action>,
}

impl TransitionRecord {
    /// True unless this was an internal (self-loop) transition.
    pub fn changed_state(&self) -> bool {
        self.from != self.to
    }
}

/// Ordered history of matched transitions.
///
/// # Example
///
/// ```rust
/// use pp_region::core::{Event, RegionState, TransitionHistory, TransitionRecord};
///
/// let history = TransitionHistory::new();
/// let history = history.record(TransitionRecord {
///     position: 0,
///     event: Event::MatchFalse,
///     from: RegionState::Inactive,
///     to: RegionState::FalseRegion,
///     depth: 1,
///     actions: vec![],
/// });
///
/// let path = history.get_path();
/// assert_eq!(path, vec![&RegionState::Inactive, &RegionState::FalseRegion]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionHistory {
    records: Vec<TransitionRecord>,
}

impl TransitionHistory {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    ///
    /// The existing history is left untouched.
    pub fn record(&self, record: TransitionRecord) -> Self {
        let mut records = self.records.clone();
        records.push(record);
        Self { records }
    }

    /// Append a transition in place.
    pub fn push(&mut self, record: TransitionRecord) {
        self.records.push(record);
    }

    /// Get the path of states traversed.
    ///
    /// Returns the initial state, then the `to` state of each record.
    pub fn get_path(&self) -> Vec<&RegionState> {
        let mut path = Vec::new();
        if let Some(first) = self.records.first() {
            path.push(&first.from);
        }
        for record in &self.records {
            path.push(&record.to);
        }
        path
    }

    /// Every action fired across the recorded transitions, flattened.
    pub fn actions(&self) -> impl Iterator<Item = Action> + '_ {
        self.records.iter().flat_map(|r| r.actions.iter().copied())
    }

    pub fn records(&self) -> &[TransitionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
