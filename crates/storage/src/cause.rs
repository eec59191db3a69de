//! Probable outage causes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A natural event that contributed to an outage.
///
/// The vocabulary is fixed. Causes serialize as their display label
/// (`"Heavy Rain"`, `"Snow/Ice"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cause {
    #[serde(rename = "Heavy Rain")]
    HeavyRain,
    Thunderstorm,
    Hurricane,
    Tornado,
    Flooding,
    Landslide,
    #[serde(rename = "Strong Wind")]
    StrongWind,
    #[serde(rename = "Snow/Ice")]
    SnowIce,
    #[serde(rename = "Extreme Heat")]
    ExtremeHeat,
    Earthquake,
}

impl Cause {
    /// Every cause, in the order they are offered to the user.
    pub const ALL: [Cause; 10] = [
        Cause::HeavyRain,
        Cause::Thunderstorm,
        Cause::Hurricane,
        Cause::Tornado,
        Cause::Flooding,
        Cause::Landslide,
        Cause::StrongWind,
        Cause::SnowIce,
        Cause::ExtremeHeat,
        Cause::Earthquake,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Cause::HeavyRain => "Heavy Rain",
            Cause::Thunderstorm => "Thunderstorm",
            Cause::Hurricane => "Hurricane",
            Cause::Tornado => "Tornado",
            Cause::Flooding => "Flooding",
            Cause::Landslide => "Landslide",
            Cause::StrongWind => "Strong Wind",
            Cause::SnowIce => "Snow/Ice",
            Cause::ExtremeHeat => "Extreme Heat",
            Cause::Earthquake => "Earthquake",
        }
    }

    /// Kebab-case form accepted on the command line (`heavy-rain`, `snow-ice`).
    pub fn slug(self) -> String {
        self.label().to_lowercase().replace([' ', '/'], "-")
    }
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a string names no known cause.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown cause '{0}'")]
pub struct UnknownCause(pub String);

impl FromStr for Cause {
    type Err = UnknownCause;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Cause::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(wanted) || c.slug() == wanted.to_lowercase())
            .ok_or_else(|| UnknownCause(s.to_string()))
    }
}

/// An ordered, duplicate-free list of causes.
///
/// Order is the order causes were added. Deserializing a list with repeats
/// keeps only the first occurrence of each.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Cause>", into = "Vec<Cause>")]
pub struct Causes(Vec<Cause>);

impl Causes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the presence of `cause`: remove it if selected, append it otherwise.
    pub fn toggle(&mut self, cause: Cause) {
        if let Some(pos) = self.0.iter().position(|c| *c == cause) {
            self.0.remove(pos);
        } else {
            self.0.push(cause);
        }
    }

    /// Append `cause` unless already present. Returns whether it was added.
    pub fn insert(&mut self, cause: Cause) -> bool {
        if self.contains(cause) {
            return false;
        }
        self.0.push(cause);
        true
    }

    pub fn contains(&self, cause: Cause) -> bool {
        self.0.contains(&cause)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Cause> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[Cause] {
        &self.0
    }
}

impl From<Vec<Cause>> for Causes {
    fn from(causes: Vec<Cause>) -> Self {
        causes.into_iter().collect()
    }
}

impl From<Causes> for Vec<Cause> {
    fn from(causes: Causes) -> Self {
        causes.0
    }
}

impl FromIterator<Cause> for Causes {
    fn from_iter<I: IntoIterator<Item = Cause>>(iter: I) -> Self {
        let mut causes = Causes::new();
        for cause in iter {
            causes.insert(cause);
        }
        causes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_label() {
        let json = serde_json::to_string(&Cause::SnowIce).unwrap();
        assert_eq!(json, "\"Snow/Ice\"");
        let cause: Cause = serde_json::from_str("\"Heavy Rain\"").unwrap();
        assert_eq!(cause, Cause::HeavyRain);
    }

    #[test]
    fn parses_label_or_slug() {
        assert_eq!("heavy rain".parse::<Cause>().unwrap(), Cause::HeavyRain);
        assert_eq!("snow-ice".parse::<Cause>().unwrap(), Cause::SnowIce);
        assert_eq!("Extreme Heat".parse::<Cause>().unwrap(), Cause::ExtremeHeat);
        assert!("volcano".parse::<Cause>().is_err());
    }

    #[test]
    fn toggle_flips_presence() {
        let mut causes = Causes::new();
        causes.toggle(Cause::Tornado);
        causes.toggle(Cause::Flooding);
        assert_eq!(causes.as_slice(), &[Cause::Tornado, Cause::Flooding]);

        causes.toggle(Cause::Tornado);
        assert_eq!(causes.as_slice(), &[Cause::Flooding]);
    }

    #[test]
    fn insert_never_duplicates() {
        let mut causes = Causes::new();
        assert!(causes.insert(Cause::Hurricane));
        assert!(!causes.insert(Cause::Hurricane));
        assert_eq!(causes.len(), 1);
    }

    #[test]
    fn deserialize_drops_repeats_keeping_order() {
        let causes: Causes =
            serde_json::from_str(r#"["Tornado","Heavy Rain","Tornado","Earthquake"]"#).unwrap();
        assert_eq!(
            causes.as_slice(),
            &[Cause::Tornado, Cause::HeavyRain, Cause::Earthquake]
        );
    }
}
