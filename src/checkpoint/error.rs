use crate::core::RegionState;
use crate::table::TableViolation;
use thiserror::Error;

/// Reasons a checkpoint cannot be written, read, or resumed.
#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("Could not encode checkpoint: {0}")]
    Encode(String),

    #[error("Could not decode checkpoint: {0}")]
    Decode(String),

    #[error("Checkpoint format {found} is not readable by this build (expects {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("Checkpoint symbol '{0}' is not a valid macro identifier")]
    InvalidSymbol(String),

    /// `depth == 0` and `Inactive` must agree.
    #[error("Checkpoint state {state} cannot occur at depth {depth}")]
    InconsistentState { state: RegionState, depth: usize },

    #[error("Checkpoint counts {unmatched} unmatched events but only {position} processed")]
    CounterMismatch { unmatched: usize, position: usize },

    /// Every processed event is either recorded or counted as unmatched.
    #[error(
        "Checkpoint history holds {recorded} records and {unmatched} unmatched events, \
         but {position} events were processed"
    )]
    HistoryLengthMismatch {
        recorded: usize,
        unmatched: usize,
        position: usize,
    },

    #[error(
        "Checkpoint history ends in {recorded_state} at depth {recorded_depth}, \
         but the snapshot is {state} at depth {depth}"
    )]
    HistoryStateMismatch {
        recorded_state: RegionState,
        recorded_depth: usize,
        state: RegionState,
        depth: usize,
    },

    /// The snapshot came from a tracker with a custom table.
    #[error("Checkpoint was taken with a custom transition table; resume it with that table")]
    CustomTableRequired,

    #[error("Resume table is invalid ({} violation(s))", .0.len())]
    InvalidTable(Vec<TableViolation>),
}
