//! Views over the outage collection.
//!
//! Everything here is a pure function of a slice of [`storage::EventRecord`]:
//! duration classes and statistics, per-location counts and search, the
//! damage filter and newest-first ordering. [`ReportConfig`] holds the
//! tunable thresholds and is loaded from the `powerguard.toml` file.

mod config;
mod duration;
mod error;
mod listing;
mod location;
mod tips;

pub use config::{DurationBuckets, LocationSettings, ReportConfig};
pub use duration::{DurationClass, DurationReport, format_hours, longest_resolved};
pub use error::{Error, Result};
pub use listing::{newest_first, with_damages};
pub use location::{LocationStat, location_stats, search_by_location};
pub use tips::{TIPS, TipSection};
