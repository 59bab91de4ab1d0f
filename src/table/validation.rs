//! Static checks on transition tables.
//!
//! Every check runs and every defect is collected, so a broken table is
//! reported in one pass instead of one error at a time.

use crate::core::{Action, Event, Guard, RegionState};
use crate::table::{Row, TransitionTable};
use std::collections::BTreeMap;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// A defect in a transition table.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TableViolation {
    #[error("{rows} rows for {state} + {event} are not split by first_level / !first_level")]
    AmbiguousGuards {
        state: RegionState,
        event: Event,
        rows: usize,
    },

    #[error("row `{row}` pops on a non-Close event")]
    PopWithoutClose { row: String },

    #[error("row `{row}` enters a region without exactly one Push")]
    EntryWithoutPush { row: String },

    #[error("row `{row}` returns to Inactive without a first-level Close that pops once")]
    ExitWithoutPop { row: String },
}

type Check = Validation<(), NonEmptyVec<TableViolation>>;

fn check_guards(state: RegionState, event: Event, rows: &[&Row]) -> Check {
    if rows.len() < 2 {
        return Validation::success(());
    }
    let split = rows.len() == 2
        && rows.iter().any(|r| r.guard == Some(Guard::FirstLevel))
        && rows.iter().any(|r| r.guard == Some(Guard::NotFirstLevel));
    if split {
        Validation::success(())
    } else {
        Validation::fail(TableViolation::AmbiguousGuards {
            state,
            event,
            rows: rows.len(),
        })
    }
}

fn check_pop(row: &Row) -> Check {
    if row.count(Action::Pop) > 0 && row.event != Event::Close {
        Validation::fail(TableViolation::PopWithoutClose {
            row: row.to_string(),
        })
    } else {
        Validation::success(())
    }
}

fn check_entry(row: &Row) -> Check {
    let enters = row.from == RegionState::Inactive && row.to.in_region();
    if enters && (row.count(Action::Push) != 1 || row.count(Action::Pop) != 0) {
        Validation::fail(TableViolation::EntryWithoutPush {
            row: row.to_string(),
        })
    } else {
        Validation::success(())
    }
}

fn check_exit(row: &Row) -> Check {
    let exits = row.from.in_region() && row.to == RegionState::Inactive;
    let well_formed = row.event == Event::Close
        && row.guard == Some(Guard::FirstLevel)
        && row.count(Action::Pop) == 1
        && row.count(Action::Push) == 0;
    if exits && !well_formed {
        Validation::fail(TableViolation::ExitWithoutPop {
            row: row.to_string(),
        })
    } else {
        Validation::success(())
    }
}

/// Run every check against the table, accumulating ALL violations.
pub fn validate(table: &TransitionTable) -> Validation<(), NonEmptyVec<TableViolation>> {
    let mut checks: Vec<Check> = Vec::new();

    // BTreeMap keeps the reported order stable.
    let mut groups: BTreeMap<(usize, usize), Vec<&Row>> = BTreeMap::new();
    for row in table.rows() {
        groups
            .entry((state_ordinal(row.from), event_ordinal(row.event)))
            .or_default()
            .push(row);
    }
    for rows in groups.values() {
        checks.push(check_guards(rows[0].from, rows[0].event, rows));
    }

    for row in table.rows() {
        checks.push(check_pop(row));
        checks.push(check_entry(row));
        checks.push(check_exit(row));
    }

    Validation::all_vec(checks).map(|_| ())
}

fn state_ordinal(state: RegionState) -> usize {
    RegionState::ALL
        .iter()
        .position(|s| *s == state)
        .unwrap_or(usize::MAX)
}

fn event_ordinal(event: Event) -> usize {
    Event::ALL
        .iter()
        .position(|e| *e == event)
        .unwrap_or(usize::MAX)
}

impl TransitionTable {
    /// Check the table for structural defects.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<TableViolation>> {
        validate(self)
    }

    /// Like [`validate`](Self::validate), flattened into a `Result`.
    pub fn check(&self) -> Result<(), Vec<TableViolation>> {
        match self.validate() {
            Validation::Success(_) => Ok(()),
            Validation::Failure(errors) => Err(errors.iter().cloned().collect()),
        }
    }
}
