//! Match score value object (0-100 scale).

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::ValidationError;

/// How well a ranked item fits the submitted answers, 0 to 100 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct MatchScore(u8);

impl MatchScore {
    pub const ZERO: Self = Self(0);
    pub const PERFECT: Self = Self(100);

    /// Creates a new MatchScore, clamping to the valid range.
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    /// Creates a MatchScore, returning error if out of range.
    pub fn try_new(value: i64) -> Result<Self, ValidationError> {
        if !(0..=100).contains(&value) {
            return Err(ValidationError::out_of_range("match_score", 0, 100, value));
        }
        Ok(Self(value as u8))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Returns the value as a fraction (0.0 to 1.0).
    pub fn as_fraction(&self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl Default for MatchScore {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for MatchScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

// The backend occasionally sends fractional scores; round and clamp them.
impl<'de> Deserialize<'de> for MatchScore {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = f64::deserialize(deserializer)?;
        if !raw.is_finite() {
            return Err(serde::de::Error::custom("match score must be finite"));
        }
        Ok(Self(raw.round().clamp(0.0, 100.0) as u8))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_to_100() {
        assert_eq!(MatchScore::new(87).value(), 87);
        assert_eq!(MatchScore::new(101).value(), 100);
        assert_eq!(MatchScore::new(255).value(), 100);
    }

    #[test]
    fn try_new_rejects_out_of_range() {
        assert!(MatchScore::try_new(0).is_ok());
        assert!(MatchScore::try_new(100).is_ok());
        match MatchScore::try_new(-1) {
            Err(ValidationError::OutOfRange { field, actual, .. }) => {
                assert_eq!(field, "match_score");
                assert_eq!(actual, -1);
            }
            other => panic!("Expected OutOfRange error, got {:?}", other),
        }
    }

    #[test]
    fn as_fraction_converts() {
        assert!((MatchScore::new(50).as_fraction() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn displays_as_percentage() {
        assert_eq!(MatchScore::new(92).to_string(), "92%");
    }

    #[test]
    fn deserializes_integers_and_fractions() {
        let whole: MatchScore = serde_json::from_str("94").unwrap();
        assert_eq!(whole.value(), 94);

        let fractional: MatchScore = serde_json::from_str("88.6").unwrap();
        assert_eq!(fractional.value(), 89);

        let over: MatchScore = serde_json::from_str("130").unwrap();
        assert_eq!(over, MatchScore::PERFECT);
    }

    #[test]
    fn serializes_as_plain_number() {
        assert_eq!(serde_json::to_string(&MatchScore::new(71)).unwrap(), "71");
    }
}
