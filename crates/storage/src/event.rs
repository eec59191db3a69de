//! Outage event records.

use crate::{Cause, Causes, Error, Result};
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A unique identifier for an outage event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub Uuid);

impl EventId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EventId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// One reported power outage.
///
/// Serialized with camelCase keys; `date` is RFC 3339 with millisecond
/// precision (`2024-01-01T00:00:00.000Z`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub id: EventId,
    pub location: String,
    /// Hours, as estimated when the outage was reported.
    pub estimated_duration: f64,
    /// Hours, recorded on resolution.
    pub actual_duration: Option<f64>,
    pub damages: String,
    #[serde(with = "date_format")]
    pub date: DateTime<Utc>,
    pub resolved: bool,
    pub causes: Causes,
}

impl EventRecord {
    /// Build a record from a draft, stamping it with a fresh id and the
    /// current time truncated to milliseconds.
    pub(crate) fn from_draft(draft: EventDraft) -> Self {
        Self {
            id: EventId::new(),
            location: draft.location,
            estimated_duration: draft.estimated_duration,
            actual_duration: None,
            damages: draft.damages,
            date: Utc::now().trunc_subsecs(3),
            resolved: false,
            causes: draft.causes,
        }
    }

    /// Mark the event resolved with its actual duration in hours.
    ///
    /// No other field changes. Resolving again overwrites the duration.
    pub fn resolve(&mut self, actual_duration: f64) -> Result<()> {
        check_duration("actual duration", actual_duration)?;
        self.actual_duration = Some(actual_duration);
        self.resolved = true;
        Ok(())
    }

    /// Actual duration when resolved, otherwise the estimate.
    pub fn effective_duration(&self) -> f64 {
        match (self.resolved, self.actual_duration) {
            (true, Some(actual)) => actual,
            _ => self.estimated_duration,
        }
    }

    pub fn has_damages(&self) -> bool {
        !self.damages.trim().is_empty()
    }
}

/// A new event as entered by the user, before the store assigns `id` and `date`.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDraft {
    location: String,
    estimated_duration: f64,
    damages: String,
    causes: Causes,
}

impl EventDraft {
    /// Start a draft. The location must not be blank and the estimate must be
    /// a positive number of hours.
    pub fn new(location: impl Into<String>, estimated_duration: f64) -> Result<Self> {
        let location = location.into();
        if location.trim().is_empty() {
            return Err(Error::InvalidRecord("location is required".into()));
        }
        check_duration("estimated duration", estimated_duration)?;
        Ok(Self {
            location,
            estimated_duration,
            damages: String::new(),
            causes: Causes::new(),
        })
    }

    pub fn with_damages(mut self, damages: impl Into<String>) -> Self {
        self.damages = damages.into();
        self
    }

    /// Toggle a cause, as tapping it on the form would.
    pub fn with_cause(mut self, cause: Cause) -> Self {
        self.causes.toggle(cause);
        self
    }

    pub fn with_causes(mut self, causes: Causes) -> Self {
        self.causes = causes;
        self
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn estimated_duration(&self) -> f64 {
        self.estimated_duration
    }

    pub fn damages(&self) -> &str {
        &self.damages
    }

    pub fn causes(&self) -> &Causes {
        &self.causes
    }
}

fn check_duration(what: &str, hours: f64) -> Result<()> {
    if hours.is_finite() && hours > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidRecord(format!(
            "{what} must be a positive number of hours, got {hours}"
        )))
    }
}

mod date_format {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> EventRecord {
        EventRecord {
            id: "6f1c1f8e-6c67-4b8a-9a53-0f1e6f5d2a10".parse().unwrap(),
            location: "Riverside".into(),
            estimated_duration: 2.5,
            actual_duration: None,
            damages: String::new(),
            date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            resolved: false,
            causes: vec![Cause::HeavyRain].into(),
        }
    }

    #[test]
    fn serializes_camel_case_with_millis() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["estimatedDuration"], 2.5);
        assert!(json["actualDuration"].is_null());
        assert_eq!(json["date"], "2024-01-01T00:00:00.000Z");
        assert_eq!(json["causes"][0], "Heavy Rain");
        assert_eq!(json["id"], "6f1c1f8e-6c67-4b8a-9a53-0f1e6f5d2a10");
    }

    #[test]
    fn reads_dates_of_any_precision() {
        let json = r#"{
            "id": "6f1c1f8e-6c67-4b8a-9a53-0f1e6f5d2a10",
            "location": "Riverside",
            "estimatedDuration": 1,
            "actualDuration": 3.5,
            "damages": "fallen line",
            "date": "2024-03-05T10:20:30+02:00",
            "resolved": true,
            "causes": []
        }"#;
        let record: EventRecord = serde_json::from_str(json).unwrap();
        assert_eq!(
            record.date,
            Utc.with_ymd_and_hms(2024, 3, 5, 8, 20, 30).unwrap()
        );
        assert_eq!(record.actual_duration, Some(3.5));
    }

    #[test]
    fn resolve_only_touches_resolution_fields() {
        let original = sample();
        let mut record = original.clone();
        record.resolve(4.0).unwrap();

        assert!(record.resolved);
        assert_eq!(record.actual_duration, Some(4.0));
        assert_eq!(record.id, original.id);
        assert_eq!(record.location, original.location);
        assert_eq!(record.estimated_duration, original.estimated_duration);
        assert_eq!(record.date, original.date);
        assert_eq!(record.causes, original.causes);

        let once = record.clone();
        record.resolve(4.0).unwrap();
        assert_eq!(record, once);
    }

    #[test]
    fn resolve_rejects_non_positive() {
        let mut record = sample();
        assert!(record.resolve(0.0).is_err());
        assert!(record.resolve(f64::NAN).is_err());
        assert!(!record.resolved);
        assert_eq!(record.actual_duration, None);
    }

    #[test]
    fn draft_validation() {
        assert!(EventDraft::new("   ", 1.0).is_err());
        assert!(EventDraft::new("Downtown", 0.0).is_err());
        assert!(EventDraft::new("Downtown", -2.0).is_err());
        assert!(EventDraft::new("Downtown", f64::INFINITY).is_err());
        assert!(EventDraft::new("Downtown", 0.5).is_ok());
    }

    #[test]
    fn draft_cause_toggle_does_not_duplicate() {
        let draft = EventDraft::new("Downtown", 1.0)
            .unwrap()
            .with_cause(Cause::Tornado)
            .with_cause(Cause::Flooding)
            .with_cause(Cause::Tornado)
            .with_cause(Cause::Tornado);
        assert_eq!(draft.causes().as_slice(), &[Cause::Flooding, Cause::Tornado]);
    }

    #[test]
    fn effective_duration_prefers_actual_when_resolved() {
        let mut record = sample();
        assert_eq!(record.effective_duration(), 2.5);
        record.resolve(9.0).unwrap();
        assert_eq!(record.effective_duration(), 9.0);
    }
}
