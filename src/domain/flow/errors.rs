//! Errors raised by the question flow.
//!
//! These are caller contract violations (wrong phase, wrong answer shape),
//! not network failures. Network failures move the flow into
//! [`super::FlowPhase::Failed`] instead.

use thiserror::Error;

use super::FlowPhase;
use crate::domain::answers::AnswerShape;
use crate::domain::foundation::QuestionId;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FlowError {
    #[error("Cannot move from {from} to {to}")]
    InvalidTransition { from: FlowPhase, to: FlowPhase },

    #[error("Answers cannot change while the flow is {0}")]
    NotEditable(FlowPhase),

    #[error("No questions have been loaded")]
    NotLoaded,

    #[error("Unknown question '{0}'")]
    UnknownQuestion(QuestionId),

    #[error("Question '{question_id}' expects a {expected}, got a {actual}")]
    ShapeMismatch {
        question_id: QuestionId,
        expected: AnswerShape,
        actual: AnswerShape,
    },

    #[error("Range value for question '{0}' must be a finite number")]
    NonFiniteValue(QuestionId),

    #[error("Question '{question_id}' has no preset {index}")]
    UnknownPreset { question_id: QuestionId, index: usize },

    #[error("Submit is only possible on the last question (at {index} of {count})")]
    NotAtLastQuestion { index: usize, count: usize },

    #[error("Required questions are unanswered: {}", join_ids(.0))]
    IncompleteAnswers(Vec<QuestionId>),
}

fn join_ids(ids: &[QuestionId]) -> String {
    ids.iter()
        .map(QuestionId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
