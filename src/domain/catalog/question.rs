//! Questions asked during a recommendation search.

use serde::{Deserialize, Serialize};

use crate::domain::answers::{Answer, AnswerShape, NumericRange};
use crate::domain::foundation::{QuestionId, SubcategoryId};

/// Kind of question, which fixes the shape of its answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    #[serde(alias = "single_select", alias = "single", alias = "brand_select")]
    SingleChoice,
    #[serde(alias = "multi_select", alias = "multiple")]
    MultiChoice,
    #[serde(alias = "numeric_range", alias = "slider")]
    Range,
    #[serde(alias = "text", alias = "free_form")]
    FreeText,
}

impl QuestionKind {
    /// The only answer shape this kind accepts.
    pub fn answer_shape(&self) -> AnswerShape {
        match self {
            QuestionKind::SingleChoice | QuestionKind::FreeText => AnswerShape::Single,
            QuestionKind::MultiChoice => AnswerShape::Multiple,
            QuestionKind::Range => AnswerShape::Range,
        }
    }
}

/// Selectable option of a choice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOption {
    pub value: String,
    pub label: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

/// Named shortcut for a range question, e.g. "Under £100".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangePreset {
    pub label: String,
    pub min: f64,
    pub max: f64,
}

impl RangePreset {
    pub fn to_range(&self) -> Option<NumericRange> {
        NumericRange::new(self.min, self.max).ok()
    }
}

/// Bounds, step and presets of a range question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeBounds {
    pub min: f64,
    pub max: f64,
    #[serde(default)]
    pub step: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub presets: Vec<RangePreset>,
}

impl RangeBounds {
    /// Clamps a value into the bounds and snaps it to the step grid.
    pub fn normalize(&self, value: f64) -> f64 {
        let (lo, hi) = (self.min.min(self.max), self.min.max(self.max));
        let clamped = value.clamp(lo, hi);
        match self.step {
            Some(step) if step > 0.0 => {
                let snapped = lo + ((clamped - lo) / step).round() * step;
                snapped.clamp(lo, hi)
            }
            _ => clamped,
        }
    }

    /// The full span of the bounds as a range.
    pub fn full_range(&self) -> Option<NumericRange> {
        NumericRange::new(self.min, self.max).ok()
    }

    pub fn first_preset(&self) -> Option<&RangePreset> {
        self.presets.first()
    }
}

/// A single question of a question set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub help_text: Option<String>,
    #[serde(default)]
    pub options: Vec<QuestionOption>,
    #[serde(default)]
    pub range: Option<RangeBounds>,
}

impl Question {
    /// Whether the answer has the shape this question's kind requires.
    pub fn accepts(&self, answer: &Answer) -> bool {
        answer.shape() == self.kind.answer_shape()
    }

    pub fn option(&self, value: &str) -> Option<&QuestionOption> {
        self.options.iter().find(|o| o.value == value)
    }

    pub fn has_presets(&self) -> bool {
        self.range.as_ref().is_some_and(|r| !r.presets.is_empty())
    }
}

/// Questions for one subcategory, in asking order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSet {
    #[serde(default)]
    pub subcategory_id: Option<SubcategoryId>,
    #[serde(default)]
    pub title: Option<String>,
    pub questions: Vec<Question>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::answers::MultiSelection;

    fn range_question() -> Question {
        serde_json::from_str(
            r#"{
                "id": "budget",
                "text": "What's your budget?",
                "type": "range",
                "required": true,
                "range": {
                    "min": 0, "max": 500, "step": 25, "unit": "GBP",
                    "presets": [
                        {"label": "Under £100", "min": 0, "max": 100},
                        {"label": "£100-£250", "min": 100, "max": 250}
                    ]
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn kinds_map_to_fixed_shapes() {
        assert_eq!(QuestionKind::SingleChoice.answer_shape(), AnswerShape::Single);
        assert_eq!(QuestionKind::FreeText.answer_shape(), AnswerShape::Single);
        assert_eq!(QuestionKind::MultiChoice.answer_shape(), AnswerShape::Multiple);
        assert_eq!(QuestionKind::Range.answer_shape(), AnswerShape::Range);
    }

    #[test]
    fn kind_accepts_backend_aliases() {
        let kind: QuestionKind = serde_json::from_str("\"brand_select\"").unwrap();
        assert_eq!(kind, QuestionKind::SingleChoice);
        let kind: QuestionKind = serde_json::from_str("\"multi_select\"").unwrap();
        assert_eq!(kind, QuestionKind::MultiChoice);
        let kind: QuestionKind = serde_json::from_str("\"free_text\"").unwrap();
        assert_eq!(kind, QuestionKind::FreeText);
    }

    #[test]
    fn parses_range_question_with_presets() {
        let question = range_question();
        assert_eq!(question.kind, QuestionKind::Range);
        assert!(question.required);
        assert!(question.has_presets());
        let bounds = question.range.as_ref().unwrap();
        assert_eq!(bounds.first_preset().unwrap().label, "Under £100");
    }

    #[test]
    fn accepts_only_matching_shape() {
        let question = range_question();
        assert!(question.accepts(&Answer::Range(NumericRange::new(0.0, 10.0).unwrap())));
        assert!(!question.accepts(&Answer::single("cheap")));
        assert!(!question.accepts(&Answer::Multiple(MultiSelection::new())));
    }

    #[test]
    fn normalize_clamps_and_snaps() {
        let bounds = range_question().range.unwrap();
        assert_eq!(bounds.normalize(-40.0), 0.0);
        assert_eq!(bounds.normalize(9_999.0), 500.0);
        assert_eq!(bounds.normalize(112.0), 100.0);
        assert_eq!(bounds.normalize(113.0), 125.0);
    }

    #[test]
    fn normalize_without_step_only_clamps() {
        let bounds = RangeBounds {
            min: 1.0,
            max: 10.0,
            step: None,
            unit: None,
            presets: vec![],
        };
        assert_eq!(bounds.normalize(3.3), 3.3);
        assert_eq!(bounds.normalize(11.0), 10.0);
    }

    #[test]
    fn question_set_tolerates_missing_metadata() {
        let set: QuestionSet = serde_json::from_str(
            r#"{"questions": [{"id": "q1", "text": "Colour?", "type": "single_choice",
                "options": [{"value": "blue", "label": "Blue"}]}]}"#,
        )
        .unwrap();
        assert!(set.subcategory_id.is_none());
        assert_eq!(set.questions.len(), 1);
        assert!(!set.questions[0].required);
        assert_eq!(set.questions[0].option("blue").unwrap().label, "Blue");
    }
}
