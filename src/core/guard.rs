//! Guard predicates for disambiguating competing transition rows.
//!
//! Guards are pure functions of the current nesting depth. A row with
//! `FirstLevel` only fires when the `#else`/`#endif` applies to the
//! directive that began the current region.

use serde::{Deserialize, Serialize};

/// True when an `#else`/`#endif` at this depth belongs to the directive
/// that began the current region.
pub fn at_outermost_level(depth: usize) -> bool {
    depth == 1
}

/// Pure predicate over depth attached to a transition row.
///
/// # Example
///
/// ```rust
/// use pp_region::core::Guard;
///
/// assert!(Guard::FirstLevel.check(1));
/// assert!(!Guard::FirstLevel.check(2));
/// assert!(Guard::NotFirstLevel.check(2));
/// assert_eq!(Guard::FirstLevel.negate(), Guard::NotFirstLevel);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Guard {
    /// `depth == 1`
    FirstLevel,
    /// `depth != 1`
    NotFirstLevel,
}

impl Guard {
    /// Evaluate the guard against the depth at the time of the event.
    pub fn check(&self, depth: usize) -> bool {
        match self {
            Self::FirstLevel => at_outermost_level(depth),
            Self::NotFirstLevel => !at_outermost_level(depth),
        }
    }

    /// The complementary guard.
    pub fn negate(&self) -> Self {
        match self {
            Self::FirstLevel => Self::NotFirstLevel,
            Self::NotFirstLevel => Self::FirstLevel,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::FirstLevel => "first_level",
            Self::NotFirstLevel => "!first_level",
        }
    }
}
