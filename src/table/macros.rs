//! Macro for declaring transition tables.

/// Build a [`TransitionTable`](crate::table::TransitionTable) from rows
/// written as `From + Event [if Guard] => To [Actions]`.
///
/// States, events, guards and actions are given by variant name.
///
/// # Example
///
/// ```
/// use pp_region::core::{Event, RegionState};
/// use pp_region::table::Selection;
/// use pp_region::transition_table;
///
/// let table = transition_table! {
///     Inactive + MatchTrue => TrueRegion [Push, BeginRegion];
///     TrueRegion + Close if FirstLevel => Inactive [Pop, EndRegion];
///     TrueRegion + Close if NotFirstLevel => TrueRegion [Pop];
/// };
///
/// assert_eq!(table.len(), 3);
/// let selection = table.select(RegionState::TrueRegion, Event::Close, 1);
/// assert!(matches!(selection, Selection::Row(row) if row.to == RegionState::Inactive));
/// ```
#[macro_export]
macro_rules! transition_table {
    (@guard) => {
        ::std::option::Option::None
    };
    (@guard $guard:ident) => {
        ::std::option::Option::Some($crate::core::Guard::$guard)
    };
    (
        $(
            $from:ident + $event:ident $(if $guard:ident)? => $to:ident
                [$($action:ident),* $(,)?]
        );* $(;)?
    ) => {
        $crate::table::TransitionTable::new(vec![
            $(
                $crate::table::Row {
                    from: $crate::core::RegionState::$from,
                    event: $crate::core::Event::$event,
                    guard: $crate::transition_table!(@guard $($guard)?),
                    actions: vec![$($crate::core::Action::$action),*],
                    to: $crate::core::RegionState::$to,
                }
            ),*
        ])
    };
}
