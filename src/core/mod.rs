//! Core tracker types and logic.
//!
//! This module contains the pure part of the region tracker:
//! - The event, state and action alphabet
//! - Guard predicates over nesting depth
//! - Transition history
//!
//! Nothing in this module performs side effects; sink calls happen in
//! the tracker.

mod guard;
mod history;
mod state;

pub use guard::{at_outermost_level, Guard};
pub use history::{TransitionHistory, TransitionRecord};
pub use state::{Action, Event, RegionState, TrackerState};
