//! Provenance levels recording how a credential value was obtained.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How authoritative a field's current value is.
///
/// Ordered lowest to highest. A write at level `L` replaces a value held at
/// `L0` only when `L >= L0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProvenanceLevel {
    /// Never written.
    #[default]
    Uninitialised,
    /// Best-effort value from the local environment.
    Guessed,
    /// Value produced by a registered callback (e.g. an interactive prompt).
    Callback,
    /// Explicitly supplied by the caller.
    Specified,
}

impl ProvenanceLevel {
    /// Returns the string representation of the level.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Uninitialised => "uninitialised",
            Self::Guessed => "guessed",
            Self::Callback => "callback",
            Self::Specified => "specified",
        }
    }

    /// Parses a level from a string (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "uninitialised" | "uninitialized" => Some(Self::Uninitialised),
            "guessed" | "guess" => Some(Self::Guessed),
            "callback" => Some(Self::Callback),
            "specified" => Some(Self::Specified),
            _ => None,
        }
    }

    /// All levels, lowest first.
    #[must_use]
    pub fn all() -> [Self; 4] {
        [Self::Uninitialised, Self::Guessed, Self::Callback, Self::Specified]
    }
}

impl fmt::Display for ProvenanceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(ProvenanceLevel::Uninitialised < ProvenanceLevel::Guessed);
        assert!(ProvenanceLevel::Guessed < ProvenanceLevel::Callback);
        assert!(ProvenanceLevel::Callback < ProvenanceLevel::Specified);
    }

    #[test]
    fn test_all_is_sorted() {
        let all = ProvenanceLevel::all();
        assert!(all.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_parse_round_trips_as_str() {
        for level in ProvenanceLevel::all() {
            assert_eq!(ProvenanceLevel::parse(level.as_str()), Some(level));
        }
        assert_eq!(ProvenanceLevel::parse("SPECIFIED"), Some(ProvenanceLevel::Specified));
        assert_eq!(ProvenanceLevel::parse("bogus"), None);
    }

    #[test]
    fn test_default_is_uninitialised() {
        assert_eq!(ProvenanceLevel::default(), ProvenanceLevel::Uninitialised);
    }

    #[test]
    fn test_serialization_lowercase() {
        let json = serde_json::to_string(&ProvenanceLevel::Callback).unwrap();
        assert_eq!(json, "\"callback\"");
    }
}
