//! Checkpoint and Resume
//!
//! Splits one event stream across two trackers: the first is snapshotted
//! to JSON and bincode midway, the second resumes from the snapshot.
//!
//! Run with: cargo run --example checkpoint_resume

use pp_region::checkpoint::Checkpoint;
use pp_region::core::Event;
use pp_region::{RecordingSink, RegionTracker, TrackerBuilder};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let events = [
        Event::MatchFalse,
        Event::Open,
        Event::Close,
        Event::Else,
        Event::Open,
        Event::Close,
        Event::Close,
    ];
    let (head, tail) = events.split_at(3);

    let mut tracker = TrackerBuilder::new()
        .symbol("TEST_PP_CONDITIONAL")
        .record_history(true)
        .build(RecordingSink::new())?;
    tracker.process_all(head.iter().copied());

    let checkpoint = tracker.checkpoint();
    let json = checkpoint.to_json()?;
    let bytes = checkpoint.to_bytes()?;
    println!(
        "Checkpoint {} ({} bytes JSON, {} bytes bincode)",
        checkpoint.id,
        json.len(),
        bytes.len()
    );
    println!(
        "  state {} at depth {}, {} events processed",
        checkpoint.state.state, checkpoint.state.depth, checkpoint.position
    );

    let restored = Checkpoint::from_bytes(&bytes)?;
    let mut resumed = RegionTracker::resume(restored, RecordingSink::new())?;
    resumed.process_all(tail.iter().copied());

    if let Some(history) = resumed.history() {
        for record in history.records() {
            println!(
                "  #{:<2} {:<10} {:<14} -> {:<14} depth {}",
                record.position,
                record.event.name(),
                record.from.name(),
                record.to.name(),
                record.depth
            );
        }
    }

    let sink = resumed.finish()?;
    println!("Calls after resume: {:?}", sink.calls());
    Ok(())
}
