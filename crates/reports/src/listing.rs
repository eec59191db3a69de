//! Event list filters and ordering.

use storage::EventRecord;

/// Events with a non-blank damage description.
pub fn with_damages(events: &[EventRecord]) -> Vec<&EventRecord> {
    events.iter().filter(|e| e.has_damages()).collect()
}

/// Events ordered newest first. Events with the same date keep their stored order.
pub fn newest_first(events: &[EventRecord]) -> Vec<&EventRecord> {
    let mut sorted: Vec<&EventRecord> = events.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}
