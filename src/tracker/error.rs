//! Tracker error types.

use crate::core::RegionState;
use thiserror::Error;

/// Structural errors surfaced at end of stream.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TrackerError {
    /// The event stream ended inside a region
    #[error("Unterminated region for '{symbol}': stream ended in {state} at depth {depth}")]
    UnterminatedRegion {
        symbol: String,
        state: RegionState,
        depth: usize,
    },
}
