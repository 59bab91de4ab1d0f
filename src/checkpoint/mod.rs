//! Checkpoint and resume for trackers.
//!
//! A checkpoint captures everything about a tracker except its sink and
//! table, so a scan interrupted between events can continue later, or in
//! another process, from exactly the same state. It does remember whether
//! the table was the standard one, and a custom table must be supplied
//! again through [`RegionTracker::resume_with_table`].

use crate::builder::is_identifier;
use crate::classify::EventClassifier;
use crate::config::ElifPolicy;
use crate::core::{TrackerState, TransitionHistory};
use crate::sink::ActionSink;
use crate::table::TransitionTable;
use crate::tracker::RegionTracker;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of a tracker.
/// Does NOT include the sink or the transition table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Tracked symbol
    pub symbol: String,

    /// `#elif` classification in effect
    pub elif_policy: ElifPolicy,

    /// Whether the tracker ran on [`TransitionTable::standard`]
    pub standard_table: bool,

    /// State and depth at the time of the snapshot
    pub state: TrackerState,

    /// Events processed so far
    pub position: usize,

    /// Events that matched no row so far
    pub unmatched_events: usize,

    /// Transition history, if it was being recorded
    pub history: Option<TransitionHistory>,
}

impl Checkpoint {
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string(self).map_err(|e| CheckpointError::Encode(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self =
            serde_json::from_str(json).map_err(|e| CheckpointError::Decode(e.to_string()))?;
        checkpoint.validate()?;
        Ok(checkpoint)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::Encode(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self =
            bincode::deserialize(bytes).map_err(|e| CheckpointError::Decode(e.to_string()))?;
        checkpoint.validate()?;
        Ok(checkpoint)
    }

    /// Check that the snapshot describes a state the tracker could reach:
    /// supported version, identifier symbol, the depth/state invariant,
    /// counters that fit the position, and a recorded history (if any)
    /// that accounts for every event and ends in the snapshot state.
    pub fn validate(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                expected: CHECKPOINT_VERSION,
            });
        }
        if !is_identifier(&self.symbol) {
            return Err(CheckpointError::InvalidSymbol(self.symbol.clone()));
        }
        if !self.state.is_consistent() {
            return Err(CheckpointError::InconsistentState {
                state: self.state.state,
                depth: self.state.depth,
            });
        }
        if self.unmatched_events > self.position {
            return Err(CheckpointError::CounterMismatch {
                unmatched: self.unmatched_events,
                position: self.position,
            });
        }
        if let Some(history) = &self.history {
            self.validate_history(history)?;
        }
        Ok(())
    }

    fn validate_history(&self, history: &TransitionHistory) -> Result<(), CheckpointError> {
        if history.len() + self.unmatched_events != self.position {
            return Err(CheckpointError::HistoryLengthMismatch {
                recorded: history.len(),
                unmatched: self.unmatched_events,
                position: self.position,
            });
        }

        // Unmatched events never move the tracker, so the last record is
        // where it stands now.
        let recorded = history
            .records()
            .last()
            .map(|r| TrackerState {
                state: r.to,
                depth: r.depth,
            })
            .unwrap_or_default();
        if recorded != self.state {
            return Err(CheckpointError::HistoryStateMismatch {
                recorded_state: recorded.state,
                recorded_depth: recorded.depth,
                state: self.state.state,
                depth: self.state.depth,
            });
        }
        Ok(())
    }
}

impl<K: ActionSink> RegionTracker<K> {
    /// Snapshot the tracker.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            symbol: self.symbol().to_string(),
            elif_policy: self.classifier().elif_policy(),
            standard_table: self.table().rows() == TransitionTable::standard().rows(),
            state: self.tracker_state(),
            position: self.position(),
            unmatched_events: self.unmatched_events(),
            history: self.history().cloned(),
        }
    }

    /// Rebuild a tracker from a checkpoint with the standard table.
    ///
    /// Fails with [`CheckpointError::CustomTableRequired`] if the snapshot
    /// was taken from a tracker running a different table.
    pub fn resume(checkpoint: Checkpoint, sink: K) -> Result<Self, CheckpointError> {
        if !checkpoint.standard_table {
            return Err(CheckpointError::CustomTableRequired);
        }
        Self::restore(checkpoint, Arc::new(TransitionTable::standard()), sink)
    }

    /// Rebuild a tracker from a checkpoint with the given table.
    ///
    /// The table is checked the same way the builder checks it.
    pub fn resume_with_table(
        checkpoint: Checkpoint,
        table: Arc<TransitionTable>,
        sink: K,
    ) -> Result<Self, CheckpointError> {
        table.check().map_err(CheckpointError::InvalidTable)?;
        Self::restore(checkpoint, table, sink)
    }

    fn restore(
        checkpoint: Checkpoint,
        table: Arc<TransitionTable>,
        sink: K,
    ) -> Result<Self, CheckpointError> {
        checkpoint.validate()?;

        let classifier =
            EventClassifier::new(checkpoint.symbol).with_elif_policy(checkpoint.elif_policy);
        let mut tracker =
            RegionTracker::from_parts(classifier, table, checkpoint.state, sink, checkpoint.history);
        tracker.set_counters(checkpoint.position, checkpoint.unmatched_events);
        Ok(tracker)
    }
}
