//! Per-location statistics and search.

use std::collections::HashMap;
use storage::EventRecord;

/// How many events were reported at one location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationStat {
    pub location: String,
    pub count: usize,
}

/// Distinct locations in the order first seen, with exact-match counts.
pub fn location_stats(events: &[EventRecord]) -> Vec<LocationStat> {
    let mut stats: Vec<LocationStat> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for event in events {
        match index.get(event.location.as_str()) {
            Some(&i) => stats[i].count += 1,
            None => {
                index.insert(&event.location, stats.len());
                stats.push(LocationStat {
                    location: event.location.clone(),
                    count: 1,
                });
            }
        }
    }
    stats
}

/// Events whose location contains `query`, ignoring case.
///
/// A blank query matches everything.
pub fn search_by_location<'a>(events: &'a [EventRecord], query: &str) -> Vec<&'a EventRecord> {
    let query = query.trim().to_lowercase();
    events
        .iter()
        .filter(|e| query.is_empty() || e.location.to_lowercase().contains(&query))
        .collect()
}
