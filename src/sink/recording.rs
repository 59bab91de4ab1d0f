//! Reference sink that records calls for later inspection.

use super::ActionSink;
use crate::core::Action;
use serde::{Deserialize, Serialize};

/// Records every sink call, in order, as an [`Action`].
///
/// # Example
///
/// ```rust
/// use pp_region::core::Action;
/// use pp_region::sink::{ActionSink, RecordingSink};
///
/// let mut sink = RecordingSink::new();
/// sink.push();
/// sink.begin_region();
/// sink.pop();
/// sink.end_region();
///
/// assert_eq!(sink.region_count(), 1);
/// assert!(sink.is_well_nested());
/// assert_eq!(sink.calls()[1], Action::BeginRegion);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordingSink {
    calls: Vec<Action>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self { calls: Vec::new() }
    }

    /// Calls received so far, oldest first.
    pub fn calls(&self) -> &[Action] {
        &self.calls
    }

    pub fn into_calls(self) -> Vec<Action> {
        self.calls
    }

    /// Number of `begin_region` calls.
    pub fn region_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|a| **a == Action::BeginRegion)
            .count()
    }

    /// Only the region markers, with push/pop filtered out.
    pub fn region_markers(&self) -> Vec<Action> {
        self.calls
            .iter()
            .copied()
            .filter(|a| matches!(a, Action::BeginRegion | Action::EndRegion))
            .collect()
    }

    /// Check that every `begin_region` is closed by a later `end_region`
    /// and that no `end_region` arrives without an open region.
    pub fn is_well_nested(&self) -> bool {
        let mut open: usize = 0;
        for action in &self.calls {
            match action {
                Action::BeginRegion => open += 1,
                Action::EndRegion => {
                    if open == 0 {
                        return false;
                    }
                    open -= 1;
                }
                _ => {}
            }
        }
        open == 0
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl ActionSink for RecordingSink {
    fn begin_region(&mut self) {
        self.calls.push(Action::BeginRegion);
    }

    fn end_region(&mut self) {
        self.calls.push(Action::EndRegion);
    }

    fn push(&mut self) {
        self.calls.push(Action::Push);
    }

    fn pop(&mut self) {
        self.calls.push(Action::Pop);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_sink_is_empty_and_nested() {
        let sink = RecordingSink::new();
        assert!(sink.calls().is_empty());
        assert!(sink.is_well_nested());
        assert_eq!(sink.region_count(), 0);
    }

    #[test]
    fn unbalanced_begin_is_not_well_nested() {
        let mut sink = RecordingSink::new();
        sink.begin_region();
        assert!(!sink.is_well_nested());
    }

    #[test]
    fn end_before_begin_is_not_well_nested() {
        let mut sink = RecordingSink::new();
        sink.end_region();
        sink.begin_region();
        assert!(!sink.is_well_nested());
    }

    #[test]
    fn region_markers_drop_depth_calls() {
        let mut sink = RecordingSink::new();
        sink.push();
        sink.pop();
        sink.begin_region();
        sink.end_region();
        assert_eq!(
            sink.region_markers(),
            vec![Action::BeginRegion, Action::EndRegion]
        );
    }

    #[test]
    fn clear_forgets_calls() {
        let mut sink = RecordingSink::new();
        sink.push();
        sink.clear();
        assert!(sink.calls().is_empty());
    }

    #[test]
    fn into_calls_returns_log() {
        let mut sink = RecordingSink::new();
        sink.push();
        assert_eq!(sink.into_calls(), vec![Action::Push]);
    }
}
