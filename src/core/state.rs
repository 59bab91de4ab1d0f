//! The tracker's alphabet: events in, region states, actions out.
//!
//! All types here are plain `Copy` values with no behaviour beyond pure
//! inspection, so they can be freely stored in tables, histories and
//! checkpoints.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A classified preprocessor directive, relative to one tracked symbol.
///
/// # Example
///
/// ```rust
/// use pp_region::core::Event;
///
/// assert!(Event::MatchTrue.opens_level());
/// assert!(Event::Open.opens_level());
/// assert!(!Event::Close.opens_level());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Event {
    /// A conditional on the tracked symbol whose following block is the
    /// "kept-if-true" branch.
    MatchTrue,
    /// A conditional on the tracked symbol whose following block is the
    /// "kept-if-false" branch.
    MatchFalse,
    /// Any `#if`/`#ifdef`/`#ifndef` unrelated to the tracked symbol.
    Open,
    /// `#else`
    Else,
    /// `#endif`
    Close,
}

impl Event {
    /// Every event, in declaration order.
    pub const ALL: [Event; 5] = [
        Event::MatchTrue,
        Event::MatchFalse,
        Event::Open,
        Event::Else,
        Event::Close,
    ];

    /// Get the event's name for display/logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::MatchTrue => "MatchTrue",
            Self::MatchFalse => "MatchFalse",
            Self::Open => "Open",
            Self::Else => "Else",
            Self::Close => "Close",
        }
    }

    /// True for events that start a new nesting level.
    pub fn opens_level(&self) -> bool {
        matches!(self, Self::MatchTrue | Self::MatchFalse | Self::Open)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Position of the tracker relative to conditionals on the tracked symbol.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum RegionState {
    /// Not inside any conditional keyed on the tracked symbol.
    #[default]
    Inactive,
    /// Inside the kept-if-true branch.
    TrueRegion,
    /// Inside the kept-if-false branch, before any `#else`.
    FalseRegion,
    /// Inside the `#else` clause of a region entered as true. Nothing here
    /// is emitted, but depth is still counted.
    TrueRegionElse,
}

impl RegionState {
    /// Every state, in declaration order.
    pub const ALL: [RegionState; 4] = [
        RegionState::Inactive,
        RegionState::TrueRegion,
        RegionState::FalseRegion,
        RegionState::TrueRegionElse,
    ];

    /// Get the state's name for display/logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Inactive => "Inactive",
            Self::TrueRegion => "TrueRegion",
            Self::FalseRegion => "FalseRegion",
            Self::TrueRegionElse => "TrueRegionElse",
        }
    }

    /// True for every state except `Inactive`.
    pub fn in_region(&self) -> bool {
        !matches!(self, Self::Inactive)
    }
}

impl fmt::Display for RegionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single step of a transition's action list.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Action {
    /// Increment depth.
    Push,
    /// Decrement depth. Only ever paired with a `Close` event.
    Pop,
    /// Start of a kept region.
    BeginRegion,
    /// End of a kept region.
    EndRegion,
    /// Explicitly do nothing.
    NoOp,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Push => "Push",
            Self::Pop => "Pop",
            Self::BeginRegion => "BeginRegion",
            Self::EndRegion => "EndRegion",
            Self::NoOp => "NoOp",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The tracker's only mutable data: current state plus nesting depth.
///
/// `depth` counts open conditionals since the current region was entered,
/// including the one that entered it.
///
/// # Example
///
/// ```rust
/// use pp_region::core::{RegionState, TrackerState};
///
/// let initial = TrackerState::default();
/// assert_eq!(initial.state, RegionState::Inactive);
/// assert_eq!(initial.depth, 0);
/// assert!(initial.is_consistent());
///
/// let broken = TrackerState { state: RegionState::TrueRegion, depth: 0 };
/// assert!(!broken.is_consistent());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct TrackerState {
    pub state: RegionState,
    pub depth: usize,
}

impl TrackerState {
    /// Check `depth == 0 <=> state == Inactive`.
    pub fn is_consistent(&self) -> bool {
        (self.depth == 0) == (self.state == RegionState::Inactive)
    }

    /// True when the scan can legally end here.
    pub fn is_complete(&self) -> bool {
        self.depth == 0 && self.state == RegionState::Inactive
    }
}
