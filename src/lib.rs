//! pp-region: tracking the kept branches of preprocessor conditionals
//!
//! A small pushdown automaton consumes classified preprocessor directives
//! and, for one configuration symbol, reports which spans of a translation
//! unit lie in the symbol's "true" branch. It emits ordered begin/end
//! markers that always nest correctly, however many unrelated `#if`
//! blocks sit in between.
//!
//! # Core Concepts
//!
//! - **Events**: each conditional directive, classified relative to the tracked symbol
//! - **Transition table**: `(state, event, guard) -> (actions, next state)` rows
//! - **Tracker**: current state plus nesting depth, driven one event at a time
//! - **Sinks**: receivers of the `begin_region`/`end_region`/`push`/`pop` calls
//!
//! # Example
//!
//! ```rust
//! use pp_region::core::{Action, Event};
//! use pp_region::sink::RecordingSink;
//! use pp_region::tracker::RegionTracker;
//!
//! // #ifndef TEST_PP_CONDITIONAL
//! //   discarded
//! // #else
//! //   kept
//! // #endif
//! let mut tracker = RegionTracker::new("TEST_PP_CONDITIONAL", RecordingSink::new()).unwrap();
//! tracker.process_all([Event::MatchFalse, Event::Else, Event::Close]);
//!
//! let sink = tracker.finish().unwrap();
//! assert_eq!(
//!     sink.calls(),
//!     &[Action::Push, Action::BeginRegion, Action::Pop, Action::EndRegion]
//! );
//! ```

pub mod builder;
pub mod checkpoint;
pub mod classify;
pub mod config;
pub mod core;
pub mod sink;
pub mod table;
pub mod tracker;

// Re-export commonly used types
pub use builder::{BuildError, TrackerBuilder};
pub use classify::{Directive, EventClassifier};
pub use config::{ElifPolicy, TrackerConfig};
pub use crate::core::{Action, Event, Guard, RegionState, TrackerState};
pub use sink::{ActionSink, RecordingSink, TracingSink};
pub use table::{Selection, TransitionTable};
pub use tracker::{RegionTracker, TrackerError};
