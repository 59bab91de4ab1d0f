//! Declarative transition table.
//!
//! A table is a list of rows keyed by `(state, event)`. Competing rows for
//! the same key are told apart only by their guards, never by row order.
//!
//! # Example
//!
//! ```rust
//! use pp_region::core::{Action, Event, RegionState};
//! use pp_region::table::{Selection, TransitionTable};
//!
//! let table = TransitionTable::standard();
//!
//! match table.select(RegionState::FalseRegion, Event::Close, 1) {
//!     Selection::Row(row) => {
//!         assert_eq!(row.to, RegionState::Inactive);
//!         assert_eq!(row.actions, vec![Action::Pop, Action::BeginRegion, Action::EndRegion]);
//!     }
//!     other => panic!("unexpected selection: {other:?}"),
//! }
//! ```

pub mod macros;
pub mod validation;

pub use validation::TableViolation;

use crate::core::{Action, Event, Guard, RegionState};
use std::collections::HashMap;
use std::fmt;

/// One transition: `(from, event, guard) -> (actions, to)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    pub from: RegionState,
    pub event: Event,
    pub guard: Option<Guard>,
    pub actions: Vec<Action>,
    pub to: RegionState,
}

impl Row {
    /// Check the row's guard against the depth at the time of the event.
    ///
    /// Unguarded rows always pass.
    pub fn guard_passes(&self, depth: usize) -> bool {
        self.guard.as_ref().is_none_or(|g| g.check(depth))
    }

    /// Net depth change when the row's actions run.
    pub fn depth_delta(&self) -> isize {
        self.actions
            .iter()
            .map(|a| match a {
                Action::Push => 1,
                Action::Pop => -1,
                _ => 0,
            })
            .sum()
    }

    pub(crate) fn count(&self, action: Action) -> usize {
        self.actions.iter().filter(|a| **a == action).count()
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} + {}", self.from, self.event)?;
        if let Some(guard) = &self.guard {
            write!(f, " [{}]", guard.name())?;
        }
        write!(f, " => {} (", self.to)?;
        for (i, action) in self.actions.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{action}")?;
        }
        f.write_str(")")
    }
}

/// Outcome of looking up a transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection<'a> {
    /// Exactly one row applies.
    Row(&'a Row),

    /// No row exists for `(state, event)`, or the only candidate's guard
    /// rejected the current depth.
    Unmatched,

    /// Competing rows did not resolve to exactly one. This is a defect in
    /// the table, not in the input.
    Ambiguous { matched: usize },
}

/// Transition rows plus an index keyed by `(state, event)`.
#[derive(Clone, Debug)]
pub struct TransitionTable {
    rows: Vec<Row>,
    index: HashMap<(RegionState, Event), Vec<usize>>,
}

impl TransitionTable {
    /// Build a table from rows. No validation is done here; see
    /// [`TransitionTable::validate`].
    pub fn new(rows: Vec<Row>) -> Self {
        let mut index: HashMap<(RegionState, Event), Vec<usize>> = HashMap::new();
        for (i, row) in rows.iter().enumerate() {
            index.entry((row.from, row.event)).or_default().push(i);
        }
        Self { rows, index }
    }

    /// The region-tracking table.
    ///
    /// A region entered as true begins emitting at once and ends at its
    /// `#else` or outermost `#endif`. A region entered as false only begins
    /// emitting at its outermost `#else`, or emits an explicitly empty
    /// region when it closes without one.
    pub fn standard() -> Self {
        crate::transition_table! {
            Inactive + MatchTrue => TrueRegion [Push, BeginRegion];
            TrueRegion + Open => TrueRegion [Push];
            TrueRegion + Close if NotFirstLevel => TrueRegion [Pop];
            TrueRegion + Close if FirstLevel => Inactive [Pop, EndRegion];
            TrueRegion + Else if FirstLevel => TrueRegionElse [EndRegion];

            Inactive + MatchFalse => FalseRegion [Push];
            FalseRegion + Open => FalseRegion [Push];
            FalseRegion + Close if FirstLevel => Inactive [Pop, BeginRegion, EndRegion];
            FalseRegion + Close if NotFirstLevel => FalseRegion [Pop];
            FalseRegion + Else if FirstLevel => TrueRegion [BeginRegion];

            TrueRegionElse + Open => TrueRegionElse [Push];
            TrueRegionElse + Close if FirstLevel => Inactive [Pop];
            TrueRegionElse + Close if NotFirstLevel => TrueRegionElse [Pop];
            TrueRegionElse + Else => TrueRegionElse [NoOp];

            Inactive + Open => Inactive [NoOp];
            Inactive + Close => Inactive [NoOp];
            Inactive + Else => Inactive [NoOp];
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows whose state and event match, before guard filtering.
    pub fn candidates(&self, state: RegionState, event: Event) -> impl Iterator<Item = &Row> {
        self.index
            .get(&(state, event))
            .into_iter()
            .flatten()
            .map(move |&i| &self.rows[i])
    }

    /// Pick the row for `(state, event)` at the given depth.
    ///
    /// A lone candidate is used if its guard passes. Competing candidates
    /// are filtered by guard and exactly one must remain.
    pub fn select(&self, state: RegionState, event: Event, depth: usize) -> Selection<'_> {
        let candidates: Vec<&Row> = self.candidates(state, event).collect();
        match candidates.as_slice() {
            [] => Selection::Unmatched,
            [row] => {
                if row.guard_passes(depth) {
                    Selection::Row(*row)
                } else {
                    Selection::Unmatched
                }
            }
            competing => {
                let passing: Vec<&Row> = competing
                    .iter()
                    .copied()
                    .filter(|row| row.guard_passes(depth))
                    .collect();
                match passing.as_slice() {
                    [row] => Selection::Row(*row),
                    _ => Selection::Ambiguous {
                        matched: passing.len(),
                    },
                }
            }
        }
    }
}

impl Default for TransitionTable {
    fn default() -> Self {
        Self::standard()
    }
}
