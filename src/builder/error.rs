//! Build errors for the tracker builder.

use crate::table::TableViolation;
use thiserror::Error;

/// Errors that can occur when building a tracker.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Tracked symbol not specified. Call .symbol(name) before .build()")]
    MissingSymbol,

    #[error("Tracked symbol '{0}' is not a valid macro identifier")]
    InvalidSymbol(String),

    #[error("Transition table is invalid ({} violation(s)): {}", .0.len(), summarize(.0))]
    InvalidTable(Vec<TableViolation>),
}

fn summarize(violations: &[TableViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
