//! Answer value objects.
//!
//! An answer takes exactly one of three shapes. The shape is fixed by the
//! question kind, see [`crate::domain::catalog::QuestionKind::answer_shape`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Maximum number of values a multi-choice answer may hold.
pub const MAX_MULTI_SELECTIONS: usize = 3;

/// Recorded answer to one question.
///
/// Serialized untagged: a JSON string, a JSON array of strings, or a
/// `{"min": .., "max": ..}` object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    /// Single-choice, brand-select and free-text questions.
    Single(String),
    /// Multi-choice questions.
    Multiple(MultiSelection),
    /// Numeric range questions.
    Range(NumericRange),
}

/// The shape an answer takes, independent of its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnswerShape {
    Single,
    Multiple,
    Range,
}

impl fmt::Display for AnswerShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AnswerShape::Single => "single value",
            AnswerShape::Multiple => "multiple values",
            AnswerShape::Range => "numeric range",
        };
        write!(f, "{}", s)
    }
}

impl Answer {
    /// Convenience constructor for a single string answer.
    pub fn single(value: impl Into<String>) -> Self {
        Answer::Single(value.into())
    }

    pub fn shape(&self) -> AnswerShape {
        match self {
            Answer::Single(_) => AnswerShape::Single,
            Answer::Multiple(_) => AnswerShape::Multiple,
            Answer::Range(_) => AnswerShape::Range,
        }
    }

    pub fn as_single(&self) -> Option<&str> {
        match self {
            Answer::Single(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_multiple(&self) -> Option<&MultiSelection> {
        match self {
            Answer::Multiple(selection) => Some(selection),
            _ => None,
        }
    }

    pub fn as_range(&self) -> Option<NumericRange> {
        match self {
            Answer::Range(range) => Some(*range),
            _ => None,
        }
    }
}

/// Up to [`MAX_MULTI_SELECTIONS`] distinct values, in selection order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct MultiSelection(Vec<String>);

impl MultiSelection {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Builds a selection from explicit values, rejecting duplicates and
    /// anything over capacity.
    pub fn from_values<I, S>(values: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut selection = Vec::new();
        for value in values {
            let value = value.into();
            if selection.contains(&value) {
                return Err(ValidationError::invalid_format(
                    "selection",
                    format!("duplicate value '{}'", value),
                ));
            }
            selection.push(value);
        }
        if selection.len() > MAX_MULTI_SELECTIONS {
            return Err(ValidationError::out_of_range(
                "selection",
                0,
                MAX_MULTI_SELECTIONS as i64,
                selection.len() as i64,
            ));
        }
        Ok(Self(selection))
    }

    /// Toggles a value.
    ///
    /// A present value is removed. An absent value is appended unless the
    /// selection is full, in which case nothing changes. Returns whether the
    /// selection changed.
    pub fn toggle(&mut self, value: &str) -> bool {
        if let Some(pos) = self.0.iter().position(|v| v == value) {
            self.0.remove(pos);
            return true;
        }
        if self.is_full() {
            return false;
        }
        self.0.push(value.to_string());
        true
    }

    pub fn contains(&self, value: &str) -> bool {
        self.0.iter().any(|v| v == value)
    }

    pub fn is_full(&self) -> bool {
        self.0.len() >= MAX_MULTI_SELECTIONS
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn values(&self) -> &[String] {
        &self.0
    }
}

impl TryFrom<Vec<String>> for MultiSelection {
    type Error = ValidationError;

    fn try_from(values: Vec<String>) -> Result<Self, Self::Error> {
        Self::from_values(values)
    }
}

impl From<MultiSelection> for Vec<String> {
    fn from(selection: MultiSelection) -> Self {
        selection.0
    }
}

/// Closed numeric interval with `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRange")]
pub struct NumericRange {
    min: f64,
    max: f64,
}

#[derive(Deserialize)]
struct RawRange {
    min: f64,
    max: f64,
}

impl TryFrom<RawRange> for NumericRange {
    type Error = ValidationError;

    fn try_from(raw: RawRange) -> Result<Self, Self::Error> {
        NumericRange::new(raw.min, raw.max)
    }
}

impl NumericRange {
    /// Creates a range, swapping the bounds if given in reverse order.
    pub fn new(a: f64, b: f64) -> Result<Self, ValidationError> {
        if !a.is_finite() || !b.is_finite() {
            return Err(ValidationError::invalid_format(
                "range",
                "bounds must be finite numbers",
            ));
        }
        Ok(Self {
            min: a.min(b),
            max: a.max(b),
        })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Moves the lower bound. Moving it above the upper bound pulls the upper
    /// bound up to match. Non-finite input leaves the range unchanged.
    pub fn with_min(self, value: f64) -> Self {
        if !value.is_finite() {
            return self;
        }
        Self {
            min: value,
            max: self.max.max(value),
        }
    }

    /// Moves the upper bound. Moving it below the lower bound pulls the lower
    /// bound down to match. Non-finite input leaves the range unchanged.
    pub fn with_max(self, value: f64) -> Self {
        if !value.is_finite() {
            return self;
        }
        Self {
            min: self.min.min(value),
            max: value,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ════════════════════════════════════════════════════════════════════════════
    // Answer shape
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn shape_matches_variant() {
        assert_eq!(Answer::single("blue").shape(), AnswerShape::Single);
        assert_eq!(
            Answer::Multiple(MultiSelection::new()).shape(),
            AnswerShape::Multiple
        );
        assert_eq!(
            Answer::Range(NumericRange::new(1.0, 2.0).unwrap()).shape(),
            AnswerShape::Range
        );
    }

    #[test]
    fn serializes_untagged() {
        assert_eq!(serde_json::to_string(&Answer::single("red")).unwrap(), "\"red\"");

        let multi = Answer::Multiple(MultiSelection::from_values(["a", "b"]).unwrap());
        assert_eq!(serde_json::to_string(&multi).unwrap(), r#"["a","b"]"#);

        let range = Answer::Range(NumericRange::new(50.0, 200.0).unwrap());
        assert_eq!(
            serde_json::to_string(&range).unwrap(),
            r#"{"min":50.0,"max":200.0}"#
        );
    }

    #[test]
    fn deserializes_each_shape() {
        let single: Answer = serde_json::from_str("\"wireless\"").unwrap();
        assert_eq!(single.as_single(), Some("wireless"));

        let multi: Answer = serde_json::from_str(r#"["sony","bose"]"#).unwrap();
        assert_eq!(multi.as_multiple().unwrap().values(), &["sony", "bose"]);

        let range: Answer = serde_json::from_str(r#"{"min":10,"max":20}"#).unwrap();
        let range = range.as_range().unwrap();
        assert_eq!((range.min(), range.max()), (10.0, 20.0));
    }

    #[test]
    fn oversized_selection_does_not_deserialize() {
        let result: Result<Answer, _> = serde_json::from_str(r#"["a","b","c","d"]"#);
        assert!(result.is_err());
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Multi selection
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn toggle_adds_then_removes() {
        let mut selection = MultiSelection::new();
        assert!(selection.toggle("sony"));
        assert!(selection.contains("sony"));
        assert!(selection.toggle("sony"));
        assert!(selection.is_empty());
    }

    #[test]
    fn fourth_value_is_silently_ignored() {
        let mut selection = MultiSelection::from_values(["a", "b", "c"]).unwrap();
        assert!(!selection.toggle("d"));
        assert_eq!(selection.values(), &["a", "b", "c"]);
    }

    #[test]
    fn removing_from_full_selection_frees_a_slot() {
        let mut selection = MultiSelection::from_values(["a", "b", "c"]).unwrap();
        assert!(selection.toggle("b"));
        assert!(selection.toggle("d"));
        assert_eq!(selection.values(), &["a", "c", "d"]);
    }

    #[test]
    fn from_values_rejects_duplicates() {
        assert!(MultiSelection::from_values(["a", "a"]).is_err());
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Numeric range
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn new_orders_bounds() {
        let range = NumericRange::new(300.0, 100.0).unwrap();
        assert_eq!((range.min(), range.max()), (100.0, 300.0));
        assert!(NumericRange::new(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn raising_min_past_max_pulls_max() {
        let range = NumericRange::new(100.0, 200.0).unwrap().with_min(250.0);
        assert_eq!((range.min(), range.max()), (250.0, 250.0));
    }

    #[test]
    fn lowering_max_past_min_pulls_min() {
        let range = NumericRange::new(100.0, 200.0).unwrap().with_max(50.0);
        assert_eq!((range.min(), range.max()), (50.0, 50.0));
    }

    #[test]
    fn non_finite_adjustment_is_ignored() {
        let range = NumericRange::new(1.0, 2.0).unwrap();
        assert_eq!(range.with_min(f64::INFINITY), range);
        assert_eq!(range.with_max(f64::NAN), range);
    }

    #[derive(Debug, Clone)]
    enum Adjust {
        Min(f64),
        Max(f64),
    }

    fn adjust_strategy() -> impl Strategy<Value = Adjust> {
        prop_oneof![
            (-1_000.0f64..1_000.0).prop_map(Adjust::Min),
            (-1_000.0f64..1_000.0).prop_map(Adjust::Max),
        ]
    }

    proptest! {
        #[test]
        fn selection_never_exceeds_capacity(toggles in prop::collection::vec(0u8..6, 0..40)) {
            let mut selection = MultiSelection::new();
            for v in toggles {
                let value = format!("opt{}", v);
                let was_present = selection.contains(&value);
                let was_full = selection.is_full();
                let before = selection.clone();

                selection.toggle(&value);

                prop_assert!(selection.len() <= MAX_MULTI_SELECTIONS);
                if was_present {
                    prop_assert!(!selection.contains(&value));
                    prop_assert_eq!(selection.len(), before.len() - 1);
                } else if was_full {
                    prop_assert_eq!(&selection, &before);
                } else {
                    prop_assert!(selection.contains(&value));
                }
            }
        }

        #[test]
        fn range_stays_ordered(
            start in (-1_000.0f64..1_000.0, -1_000.0f64..1_000.0),
            adjustments in prop::collection::vec(adjust_strategy(), 0..30),
        ) {
            let mut range = NumericRange::new(start.0, start.1).unwrap();
            for adjustment in adjustments {
                range = match adjustment {
                    Adjust::Min(v) => range.with_min(v),
                    Adjust::Max(v) => range.with_max(v),
                };
                prop_assert!(range.min() <= range.max());
            }
        }
    }
}
