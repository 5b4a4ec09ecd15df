//! The accumulated answers of one search session.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Answer;
use crate::domain::foundation::QuestionId;

/// Mapping from question id to its recorded answer. One entry per question;
/// writing an answer for an id that already has one replaces it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnswerSet {
    answers: BTreeMap<QuestionId, Answer>,
}

/// One `(questionId, value)` pair as submitted to the search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerEntry {
    pub question_id: QuestionId,
    pub value: Answer,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an answer, returning the one it replaced.
    pub fn upsert(&mut self, question_id: QuestionId, answer: Answer) -> Option<Answer> {
        self.answers.insert(question_id, answer)
    }

    pub fn get(&self, question_id: &QuestionId) -> Option<&Answer> {
        self.answers.get(question_id)
    }

    pub fn contains(&self, question_id: &QuestionId) -> bool {
        self.answers.contains_key(question_id)
    }

    pub fn remove(&mut self, question_id: &QuestionId) -> Option<Answer> {
        self.answers.remove(question_id)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn clear(&mut self) {
        self.answers.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, &Answer)> {
        self.answers.iter()
    }

    /// Flattens the set into submission entries, ordered by question id.
    pub fn to_entries(&self) -> Vec<AnswerEntry> {
        self.answers
            .iter()
            .map(|(question_id, value)| AnswerEntry {
                question_id: question_id.clone(),
                value: value.clone(),
            })
            .collect()
    }
}

impl FromIterator<(QuestionId, Answer)> for AnswerSet {
    fn from_iter<T: IntoIterator<Item = (QuestionId, Answer)>>(iter: T) -> Self {
        Self {
            answers: iter.into_iter().collect(),
        }
    }
}
