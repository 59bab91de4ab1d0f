//! Action sinks: where the tracker's region markers go.
//!
//! The tracker never writes text itself. Each matched transition is turned
//! into an ordered sequence of calls on an [`ActionSink`], and a sink
//! decides what those calls mean: record them, log them, or drive a text
//! transformer.

mod recording;

pub use recording::RecordingSink;

use crate::core::Action;
use tracing::debug;

/// Capability consumed by the tracker.
///
/// Calls arrive synchronously, in the order listed in the transition
/// table, with no batching.
///
/// # Example
///
/// ```rust
/// use pp_region::sink::ActionSink;
///
/// #[derive(Default)]
/// struct RegionCounter {
///     regions: usize,
/// }
///
/// impl ActionSink for RegionCounter {
///     fn begin_region(&mut self) {
///         self.regions += 1;
///     }
///     fn end_region(&mut self) {}
///     fn push(&mut self) {}
///     fn pop(&mut self) {}
/// }
///
/// let mut counter = RegionCounter::default();
/// counter.begin_region();
/// assert_eq!(counter.regions, 1);
/// ```
pub trait ActionSink {
    /// A kept region starts here.
    fn begin_region(&mut self);

    /// The current kept region ends here.
    fn end_region(&mut self);

    /// A conditional nesting level was opened.
    fn push(&mut self);

    /// A conditional nesting level was closed.
    fn pop(&mut self);

    /// Dispatch one action to the matching operation. `NoOp` makes no call.
    fn apply(&mut self, action: Action) {
        match action {
            Action::Push => self.push(),
            Action::Pop => self.pop(),
            Action::BeginRegion => self.begin_region(),
            Action::EndRegion => self.end_region(),
            Action::NoOp => {}
        }
    }
}

impl<S: ActionSink + ?Sized> ActionSink for &mut S {
    fn begin_region(&mut self) {
        (**self).begin_region();
    }

    fn end_region(&mut self) {
        (**self).end_region();
    }

    fn push(&mut self) {
        (**self).push();
    }

    fn pop(&mut self) {
        (**self).pop();
    }
}

impl<S: ActionSink + ?Sized> ActionSink for Box<S> {
    fn begin_region(&mut self) {
        (**self).begin_region();
    }

    fn end_region(&mut self) {
        (**self).end_region();
    }

    fn push(&mut self) {
        (**self).push();
    }

    fn pop(&mut self) {
        (**self).pop();
    }
}

/// Sink that discards every call.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl ActionSink for NullSink {
    fn begin_region(&mut self) {}
    fn end_region(&mut self) {}
    fn push(&mut self) {}
    fn pop(&mut self) {}
}

/// Sink that logs every call through `tracing`.
#[derive(Clone, Debug)]
pub struct TracingSink {
    symbol: String,
}

impl TracingSink {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }
}

impl ActionSink for TracingSink {
    fn begin_region(&mut self) {
        debug!(target: "pp_region::sink", symbol = %self.symbol, "begin region");
    }

    fn end_region(&mut self) {
        debug!(target: "pp_region::sink", symbol = %self.symbol, "end region");
    }

    fn push(&mut self) {
        debug!(target: "pp_region::sink", symbol = %self.symbol, "push");
    }

    fn pop(&mut self) {
        debug!(target: "pp_region::sink", symbol = %self.symbol, "pop");
    }
}

/// Forwards each call to two sinks, first then second.
#[derive(Clone, Debug, Default)]
pub struct Tee<A, B> {
    pub first: A,
    pub second: B,
}

impl<A, B> Tee<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    pub fn into_inner(self) -> (A, B) {
        (self.first, self.second)
    }
}

impl<A: ActionSink, B: ActionSink> ActionSink for Tee<A, B> {
    fn begin_region(&mut self) {
        self.first.begin_region();
        self.second.begin_region();
    }

    fn end_region(&mut self) {
        self.first.end_region();
        self.second.end_region();
    }

    fn push(&mut self) {
        self.first.push();
        self.second.push();
    }

    fn pop(&mut self) {
        self.first.pop();
        self.second.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;
    use std::sync::{Arc, Mutex};
    use tracing::field::{Field, Visit};
    use tracing::{Level, Subscriber};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    #[test]
    fn apply_dispatches_to_operations() {
        let mut sink = RecordingSink::new();
        for action in [
            Action::Push,
            Action::BeginRegion,
            Action::NoOp,
            Action::Pop,
            Action::EndRegion,
        ] {
            sink.apply(action);
        }

        assert_eq!(
            sink.calls(),
            &[
                Action::Push,
                Action::BeginRegion,
                Action::Pop,
                Action::EndRegion
            ]
        );
    }

    fn drive<K: ActionSink>(mut sink: K) {
        sink.push();
        sink.pop();
    }

    #[test]
    fn mutable_reference_forwards_calls() {
        let mut sink = RecordingSink::new();
        drive(&mut sink);
        assert_eq!(sink.calls(), &[Action::Push, Action::Pop]);
    }

    #[test]
    fn boxed_sink_forwards_calls() {
        let mut sink: Box<dyn ActionSink> = Box::new(NullSink);
        sink.apply(Action::BeginRegion);

        let mut boxed = Box::new(RecordingSink::new());
        boxed.apply(Action::BeginRegion);
        assert_eq!(boxed.calls(), &[Action::BeginRegion]);
    }

    #[test]
    fn tee_calls_both_sinks_in_order() {
        let mut tee = Tee::new(RecordingSink::new(), RecordingSink::new());
        tee.apply(Action::Push);
        tee.apply(Action::BeginRegion);

        let (first, second) = tee.into_inner();
        assert_eq!(first.calls(), second.calls());
        assert_eq!(first.calls(), &[Action::Push, Action::BeginRegion]);
    }

    /// Collects `(target, level, message, symbol)` for every event.
    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<(String, Level, String, String)>>>);

    #[derive(Default)]
    struct Fields {
        message: String,
        symbol: String,
    }

    impl Visit for Fields {
        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            match field.name() {
                "message" => self.message = format!("{value:?}"),
                "symbol" => self.symbol = format!("{value:?}"),
                _ => {}
            }
        }
    }

    impl<S: Subscriber> Layer<S> for Capture {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            let mut fields = Fields::default();
            event.record(&mut fields);
            let meta = event.metadata();
            self.0.lock().unwrap().push((
                meta.target().to_string(),
                *meta.level(),
                fields.message,
                fields.symbol,
            ));
        }
    }

    #[test]
    fn tracing_sink_logs_each_call_at_debug() {
        let capture = Capture::default();
        let subscriber = tracing_subscriber::registry().with(capture.clone());

        tracing::subscriber::with_default(subscriber, || {
            let mut sink = TracingSink::new("FEATURE_X");
            for action in [
                Action::Push,
                Action::BeginRegion,
                Action::NoOp,
                Action::EndRegion,
                Action::Pop,
            ] {
                sink.apply(action);
            }
        });

        let events = capture.0.lock().unwrap();
        let messages: Vec<&str> = events.iter().map(|e| e.2.as_str()).collect();
        assert_eq!(messages, vec!["push", "begin region", "end region", "pop"]);
        for (target, level, _, symbol) in events.iter() {
            assert_eq!(target, "pp_region::sink");
            assert_eq!(*level, Level::DEBUG);
            assert_eq!(symbol, "FEATURE_X");
        }
    }

    #[test]
    fn tracing_sink_keeps_symbol() {
        assert_eq!(TracingSink::new("FEATURE_X").symbol(), "FEATURE_X");
    }
}
