//! Aggregate statistics over the event collection.

use crate::EventRecord;
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// Derived statistics over every stored event.
///
/// Never persisted; [`EventStore::summary`](crate::EventStore::summary)
/// rebuilds it from a fresh read on each call.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    pub total_events: usize,
    pub resolved_events: usize,
    /// Mean actual duration of resolved events, `0.0` when there are none.
    pub average_duration: f64,
    /// Location with the most events; earliest seen wins a tie. Empty when
    /// there are no events.
    pub most_affected_location: String,
    /// Date of the newest event. Serialized as `""` when there are none.
    #[serde(serialize_with = "date_or_empty")]
    pub latest_event_date: Option<DateTime<Utc>>,
}

impl EventSummary {
    pub fn from_events(events: &[EventRecord]) -> Self {
        let resolved_events = events.iter().filter(|e| e.resolved).count();

        Self {
            total_events: events.len(),
            resolved_events,
            average_duration: average_resolved_duration(events),
            most_affected_location: most_frequent_location(events)
                .unwrap_or_default()
                .to_string(),
            latest_event_date: events.iter().map(|e| e.date).max(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_events == 0
    }
}

/// Mean of `actual_duration` across resolved events that have one.
pub fn average_resolved_duration(events: &[EventRecord]) -> f64 {
    let (sum, count) = events
        .iter()
        .filter(|e| e.resolved)
        .filter_map(|e| e.actual_duration)
        .fold((0.0, 0usize), |(sum, count), d| (sum + d, count + 1));

    if count == 0 { 0.0 } else { sum / count as f64 }
}

/// The location that occurs most often, compared by exact string.
///
/// Ties go to whichever location appeared first in `events`.
pub fn most_frequent_location(events: &[EventRecord]) -> Option<&str> {
    let mut order: Vec<(&str, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for event in events {
        let slot = *index.entry(event.location.as_str()).or_insert_with(|| {
            order.push((event.location.as_str(), 0));
            order.len() - 1
        });
        order[slot].1 += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for (location, count) in order {
        if best.is_none_or(|(_, top)| count > top) {
            best = Some((location, count));
        }
    }
    best.map(|(location, _)| location)
}

fn date_or_empty<S: Serializer>(date: &Option<DateTime<Utc>>, s: S) -> Result<S::Ok, S::Error> {
    match date {
        Some(date) => s.serialize_str(&date.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)),
        None => s.serialize_str(""),
    }
}
