//! Duration classes and statistics.

use crate::DurationBuckets;
use storage::{EventRecord, average_resolved_duration};

/// Coarse duration class of an outage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DurationClass {
    Short,
    Medium,
    Long,
}

impl DurationClass {
    pub const ALL: [DurationClass; 3] = [Self::Short, Self::Medium, Self::Long];

    pub fn label(self) -> &'static str {
        match self {
            Self::Short => "Short",
            Self::Medium => "Medium",
            Self::Long => "Long",
        }
    }
}

impl DurationBuckets {
    /// Classify by actual duration when resolved, else by the estimate.
    pub fn classify(&self, event: &EventRecord) -> DurationClass {
        let hours = event.effective_duration();
        if hours < self.short_below {
            DurationClass::Short
        } else if hours < self.long_from {
            DurationClass::Medium
        } else {
            DurationClass::Long
        }
    }
}

/// Duration statistics over a set of events.
#[derive(Debug, Clone, PartialEq)]
pub struct DurationReport<'a> {
    pub short: Vec<&'a EventRecord>,
    pub medium: Vec<&'a EventRecord>,
    pub long: Vec<&'a EventRecord>,
    /// Mean actual duration of resolved events, `0.0` when none.
    pub average: f64,
    /// The resolved event with the greatest actual duration.
    pub longest: Option<&'a EventRecord>,
}

impl<'a> DurationReport<'a> {
    pub fn build(events: &'a [EventRecord], buckets: &DurationBuckets) -> Self {
        let mut report = Self {
            short: Vec::new(),
            medium: Vec::new(),
            long: Vec::new(),
            average: average_resolved_duration(events),
            longest: longest_resolved(events),
        };
        for event in events {
            match buckets.classify(event) {
                DurationClass::Short => report.short.push(event),
                DurationClass::Medium => report.medium.push(event),
                DurationClass::Long => report.long.push(event),
            }
        }
        report
    }

    pub fn bucket(&self, class: DurationClass) -> &[&'a EventRecord] {
        match class {
            DurationClass::Short => &self.short,
            DurationClass::Medium => &self.medium,
            DurationClass::Long => &self.long,
        }
    }

    pub fn total(&self) -> usize {
        self.short.len() + self.medium.len() + self.long.len()
    }

    /// Share of events in `class`, between 0 and 1.
    pub fn share(&self, class: DurationClass) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.bucket(class).len() as f64 / total as f64
        }
    }
}

/// Resolved event with the greatest actual duration; the first one wins a tie.
pub fn longest_resolved(events: &[EventRecord]) -> Option<&EventRecord> {
    let mut longest: Option<(&EventRecord, f64)> = None;
    for event in events.iter().filter(|e| e.resolved) {
        let Some(hours) = event.actual_duration else {
            continue;
        };
        if longest.is_none_or(|(_, max)| hours > max) {
            longest = Some((event, hours));
        }
    }
    longest.map(|(event, _)| event)
}

/// Render hours as `"{h}h {m}m"`.
pub fn format_hours(hours: f64) -> String {
    let total_minutes = (hours * 60.0).round().max(0.0) as u64;
    format!("{}h {}m", total_minutes / 60, total_minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use storage::{Causes, EventId};

    fn event(estimated: f64, actual: Option<f64>) -> EventRecord {
        EventRecord {
            id: EventId::new(),
            location: "Anywhere".into(),
            estimated_duration: estimated,
            actual_duration: actual,
            damages: String::new(),
            date: Utc::now(),
            resolved: actual.is_some(),
            causes: Causes::new(),
        }
    }

    #[test]
    fn classify_boundaries() {
        let buckets = DurationBuckets::default();
        assert_eq!(buckets.classify(&event(1.99, None)), DurationClass::Short);
        assert_eq!(buckets.classify(&event(2.0, None)), DurationClass::Medium);
        assert_eq!(buckets.classify(&event(7.99, None)), DurationClass::Medium);
        assert_eq!(buckets.classify(&event(8.0, None)), DurationClass::Long);
    }

    #[test]
    fn classify_uses_actual_when_resolved() {
        let buckets = DurationBuckets::default();
        assert_eq!(buckets.classify(&event(1.0, Some(10.0))), DurationClass::Long);
        assert_eq!(buckets.classify(&event(10.0, Some(0.5))), DurationClass::Short);
    }

    #[test]
    fn report_groups_and_aggregates() {
        let events = vec![
            event(1.0, None),
            event(3.0, Some(4.0)),
            event(9.0, None),
            event(1.0, Some(12.0)),
        ];
        let report = DurationReport::build(&events, &DurationBuckets::default());

        assert_eq!(report.short.len(), 1);
        assert_eq!(report.medium.len(), 1);
        assert_eq!(report.long.len(), 2);
        assert_eq!(report.average, 8.0);
        assert_eq!(report.longest.map(|e| e.id), Some(events[3].id));
        assert_eq!(report.share(DurationClass::Long), 0.5);
    }

    #[test]
    fn empty_report() {
        let report = DurationReport::build(&[], &DurationBuckets::default());
        assert_eq!(report.total(), 0);
        assert_eq!(report.average, 0.0);
        assert!(report.longest.is_none());
        assert_eq!(report.share(DurationClass::Short), 0.0);
    }

    #[test]
    fn longest_prefers_first_on_tie() {
        let events = vec![event(1.0, Some(5.0)), event(1.0, Some(5.0))];
        assert_eq!(longest_resolved(&events).map(|e| e.id), Some(events[0].id));
    }

    #[test]
    fn formats_hours_and_minutes() {
        assert_eq!(format_hours(2.5), "2h 30m");
        assert_eq!(format_hours(0.25), "0h 15m");
        assert_eq!(format_hours(3.0), "3h 0m");
        assert_eq!(format_hours(1.999), "2h 0m");
    }
}
