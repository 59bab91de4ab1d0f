//! End-to-end scenarios for the region tracker.

use pp_region::core::{Action, Event, RegionState};
use pp_region::sink::RecordingSink;
use pp_region::{Directive, ElifPolicy, RegionTracker, TrackerBuilder, TrackerError};

use Action::{BeginRegion, EndRegion, Pop, Push};
use Event::{Close, Else, MatchFalse, MatchTrue, Open};

const SYMBOL: &str = "TEST_PP_CONDITIONAL";

fn run(events: &[Event]) -> RegionTracker<RecordingSink> {
    let mut tracker = RegionTracker::new(SYMBOL, RecordingSink::new()).unwrap();
    tracker.process_all(events.iter().copied());
    tracker
}

fn calls_for(events: &[Event]) -> Vec<Action> {
    let tracker = run(events);
    assert_eq!(tracker.state(), RegionState::Inactive);
    assert_eq!(tracker.depth(), 0);
    tracker.finish().unwrap().into_calls()
}

#[test]
fn unrelated_symbol_produces_no_calls() {
    assert!(calls_for(&[Open, Else, Close]).is_empty());
}

#[test]
fn simple_true_match() {
    assert_eq!(calls_for(&[MatchTrue, Close]), vec![Push, BeginRegion, Pop, EndRegion]);
}

#[test]
fn true_branch_with_else_discards_else_body() {
    assert_eq!(
        calls_for(&[MatchTrue, Else, Close]),
        vec![Push, BeginRegion, EndRegion, Pop]
    );
}

#[test]
fn false_branch_with_else_begins_at_else() {
    let mut tracker = RegionTracker::new(SYMBOL, RecordingSink::new()).unwrap();

    tracker.process(MatchFalse);
    assert_eq!(tracker.sink().calls(), &[Push]);

    tracker.process(Else);
    assert_eq!(tracker.sink().calls(), &[Push, BeginRegion]);
    assert_eq!(tracker.state(), RegionState::TrueRegion);

    tracker.process(Close);
    let calls = tracker.finish().unwrap().into_calls();
    assert_eq!(calls, vec![Push, BeginRegion, Pop, EndRegion]);
}

#[test]
fn nested_unrelated_blocks_inside_a_match() {
    let events = [MatchTrue, Open, Close, Open, Else, Close, Close];
    let mut tracker = RegionTracker::new(SYMBOL, RecordingSink::new()).unwrap();

    for (i, event) in events.iter().enumerate() {
        tracker.process(*event);
        if i + 1 < events.len() {
            assert_ne!(tracker.depth(), 0, "depth returned to 0 early at event {i}");
        }
    }
    assert_eq!(tracker.depth(), 0);

    let sink = tracker.finish().unwrap();
    assert_eq!(sink.region_markers(), vec![BeginRegion, EndRegion]);
    assert_eq!(sink.calls().first(), Some(&Push));
    assert_eq!(sink.calls().last(), Some(&EndRegion));
}

#[test]
fn false_branch_without_else_emits_empty_region() {
    assert_eq!(
        calls_for(&[MatchFalse, Close]),
        vec![Push, Pop, BeginRegion, EndRegion]
    );
}

#[test]
fn nested_blocks_in_discarded_else() {
    // #ifdef SYM / #ifdef A / #endif / #else / #ifdef B / #else / #endif / #endif
    let events = [MatchTrue, Open, Close, Else, Open, Else, Close, Close];
    let tracker = run(&events);
    assert_eq!(tracker.unmatched_events(), 0);

    let calls = tracker.finish().unwrap().into_calls();
    assert_eq!(
        calls,
        vec![Push, BeginRegion, Push, Pop, EndRegion, Push, Pop, Pop]
    );
}

#[test]
fn consecutive_regions_each_get_markers() {
    let calls = calls_for(&[MatchTrue, Close, Open, Close, MatchFalse, Else, Close]);
    let markers: Vec<Action> = calls
        .into_iter()
        .filter(|a| matches!(a, BeginRegion | EndRegion))
        .collect();
    assert_eq!(markers, vec![BeginRegion, EndRegion, BeginRegion, EndRegion]);
}

#[test]
fn truncated_stream_is_a_structural_error() {
    let tracker = run(&[MatchTrue, Open]);
    assert_eq!(
        tracker.finish().unwrap_err(),
        TrackerError::UnterminatedRegion {
            symbol: SYMBOL.to_string(),
            state: RegionState::TrueRegion,
            depth: 2,
        }
    );
}

#[test]
fn matching_if_else_from_directives() {
    // #ifdef TEST_PP_CONDITIONAL / some code / #else / other code / #endif
    let mut tracker = RegionTracker::new(SYMBOL, RecordingSink::new()).unwrap();
    tracker.process_directive(Directive::Ifdef, SYMBOL, true);
    tracker.process_directive(Directive::Else, "", false);
    tracker.process_directive(Directive::Endif, "", false);

    let calls = tracker.finish().unwrap().into_calls();
    assert_eq!(calls, vec![Push, BeginRegion, EndRegion, Pop]);
}

#[test]
fn elif_as_open_leaves_region_unterminated() {
    // #ifdef SYM / #elif X / #endif: #elif opens a level that no #endif closes
    let mut tracker = RegionTracker::new(SYMBOL, RecordingSink::new()).unwrap();
    tracker.process_directive(Directive::Ifdef, SYMBOL, true);
    tracker.process_directive(Directive::Elif, "X", false);
    tracker.process_directive(Directive::Endif, "", false);

    assert_eq!(tracker.depth(), 1);
    assert!(tracker.check_complete().is_err());
}

#[test]
fn elif_ignored_by_policy() {
    let mut tracker = TrackerBuilder::new()
        .symbol(SYMBOL)
        .elif_policy(ElifPolicy::Ignore)
        .build(RecordingSink::new())
        .unwrap();
    tracker.process_directive(Directive::Ifdef, SYMBOL, true);
    assert_eq!(tracker.process_directive(Directive::Elif, "X", false), None);
    tracker.process_directive(Directive::Endif, "", false);

    let calls = tracker.finish().unwrap().into_calls();
    assert_eq!(calls, vec![Push, BeginRegion, Pop, EndRegion]);
}
