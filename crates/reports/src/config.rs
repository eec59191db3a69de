//! Report configuration loaded from TOML.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Report settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Thresholds for the Short / Medium / Long duration classes.
    #[serde(default)]
    pub durations: DurationBuckets,

    /// Location statistics settings.
    #[serde(default)]
    pub locations: LocationSettings,
}

/// Duration class thresholds, in hours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DurationBuckets {
    /// Outages shorter than this are Short.
    #[serde(default = "default_short_below")]
    pub short_below: f64,

    /// Outages at least this long are Long.
    #[serde(default = "default_long_from")]
    pub long_from: f64,
}

impl Default for DurationBuckets {
    fn default() -> Self {
        Self {
            short_below: default_short_below(),
            long_from: default_long_from(),
        }
    }
}

/// Location statistics settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationSettings {
    /// How many locations the statistics grid shows.
    #[serde(default = "default_top")]
    pub top: usize,
}

impl Default for LocationSettings {
    fn default() -> Self {
        Self { top: default_top() }
    }
}

fn default_short_below() -> f64 {
    2.0
}

fn default_long_from() -> f64 {
    8.0
}

fn default_top() -> usize {
    6
}

impl ReportConfig {
    /// Load report settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse report settings from a TOML string.
    pub fn parse(toml: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml).map_err(|e| Error::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the thresholds are usable.
    pub fn validate(&self) -> Result<()> {
        self.durations.validate()
    }
}

impl DurationBuckets {
    pub fn validate(&self) -> Result<()> {
        let DurationBuckets {
            short_below,
            long_from,
        } = *self;
        if !(short_below.is_finite() && short_below > 0.0) {
            return Err(Error::Invalid(format!(
                "durations.short_below must be positive, got {short_below}"
            )));
        }
        if !(long_from.is_finite() && long_from > short_below) {
            return Err(Error::Invalid(format!(
                "durations.long_from ({long_from}) must be greater than short_below ({short_below})"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ReportConfig::parse("").unwrap();
        assert_eq!(config.durations.short_below, 2.0);
        assert_eq!(config.durations.long_from, 8.0);
        assert_eq!(config.locations.top, 6);
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
[durations]
short_below = 1.5
long_from = 12

[locations]
top = 3
"#;
        let config = ReportConfig::parse(toml).unwrap();
        assert_eq!(config.durations.short_below, 1.5);
        assert_eq!(config.durations.long_from, 12.0);
        assert_eq!(config.locations.top, 3);
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config = ReportConfig::parse("[durations]\nlong_from = 10.0\n").unwrap();
        assert_eq!(config.durations.short_below, 2.0);
        assert_eq!(config.durations.long_from, 10.0);
    }

    #[test]
    fn test_rejects_inverted_thresholds() {
        let err = ReportConfig::parse("[durations]\nshort_below = 8.0\nlong_from = 2.0\n");
        assert!(matches!(err, Err(Error::Invalid(_))));

        let err = ReportConfig::parse("[durations]\nshort_below = 0\n");
        assert!(matches!(err, Err(Error::Invalid(_))));
    }

    #[test]
    fn test_rejects_bad_toml() {
        assert!(matches!(
            ReportConfig::parse("[durations\n"),
            Err(Error::Parse(_))
        ));
    }
}
