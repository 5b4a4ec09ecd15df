//! QuestionFlow - in-memory state of one recommendation search.
//!
//! Holds the question list, the current position, the answers and the
//! session phase. Every method is synchronous and side-effect free; the
//! async shell that talks to the backend lives in
//! `application::flow::AnswerFlowEngine`.
//!
//! # Invariants
//!
//! - `index` stays in `[0, questions.len() - 1]` whenever questions are loaded
//! - at most one answer per question, shaped for the question's kind
//! - multi-choice answers hold at most three values
//! - range answers satisfy `min <= max`

use std::collections::{HashMap, HashSet};

use super::{FlowError, FlowPhase};
use crate::domain::answers::{Answer, AnswerSet, MultiSelection, NumericRange};
use crate::domain::catalog::{Question, QuestionKind, QuestionSet};
use crate::domain::foundation::{QuestionId, StateMachine, SubcategoryId};
use crate::domain::search::RankedResult;

/// Which action produced a failure, and therefore which action retries it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailedAction {
    LoadQuestions,
    Submit,
}

/// Why the flow entered [`FlowPhase::Failed`].
#[derive(Debug, Clone, PartialEq)]
pub struct FlowFailure {
    pub action: FailedAction,
    pub message: String,
    /// The backend rejected the credentials; re-register before retrying.
    pub requires_reauthentication: bool,
}

impl FlowFailure {
    pub fn new(action: FailedAction, message: impl Into<String>) -> Self {
        Self {
            action,
            message: message.into(),
            requires_reauthentication: false,
        }
    }

    pub fn with_reauthentication(mut self) -> Self {
        self.requires_reauthentication = true;
        self
    }
}

/// Session status with the data each phase carries.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowStatus {
    Idle,
    Loading,
    Active,
    Searching,
    Results(RankedResult),
    Blocked,
    Failed(FlowFailure),
}

impl FlowStatus {
    pub fn phase(&self) -> FlowPhase {
        match self {
            FlowStatus::Idle => FlowPhase::Idle,
            FlowStatus::Loading => FlowPhase::Loading,
            FlowStatus::Active => FlowPhase::Active,
            FlowStatus::Searching => FlowPhase::Searching,
            FlowStatus::Results(_) => FlowPhase::Results,
            FlowStatus::Blocked => FlowPhase::Blocked,
            FlowStatus::Failed(_) => FlowPhase::Failed,
        }
    }
}

/// State of one linear walk through a question list.
#[derive(Debug, Clone)]
pub struct QuestionFlow {
    subcategory: Option<SubcategoryId>,
    questions: Vec<Question>,
    index: usize,
    answers: AnswerSet,
    selected_presets: HashMap<QuestionId, usize>,
    displayed: HashSet<QuestionId>,
    status: FlowStatus,
}

impl Default for QuestionFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl QuestionFlow {
    pub fn new() -> Self {
        Self {
            subcategory: None,
            questions: Vec::new(),
            index: 0,
            answers: AnswerSet::new(),
            selected_presets: HashMap::new(),
            displayed: HashSet::new(),
            status: FlowStatus::Idle,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────

    pub fn status(&self) -> &FlowStatus {
        &self.status
    }

    pub fn phase(&self) -> FlowPhase {
        self.status.phase()
    }

    pub fn subcategory(&self) -> Option<&SubcategoryId> {
        self.subcategory.as_ref()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.index)
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn answer(&self, question_id: &QuestionId) -> Option<&Answer> {
        self.answers.get(question_id)
    }

    /// Index of the preset currently marked as selected for a range question.
    pub fn selected_preset(&self, question_id: &QuestionId) -> Option<usize> {
        self.selected_presets.get(question_id).copied()
    }

    pub fn result(&self) -> Option<&RankedResult> {
        match &self.status {
            FlowStatus::Results(result) => Some(result),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&FlowFailure> {
        match &self.status {
            FlowStatus::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        !self.questions.is_empty() && self.index + 1 == self.questions.len()
    }

    /// Fraction of the walk completed, counting the current question.
    pub fn progress(&self) -> f64 {
        if self.questions.is_empty() {
            return 0.0;
        }
        (self.index + 1) as f64 / self.questions.len() as f64
    }

    /// True iff the current question is optional or already answered.
    pub fn can_advance(&self) -> bool {
        match self.current_question() {
            Some(question) => !question.required || self.answers.contains(&question.id),
            None => false,
        }
    }

    /// Required questions that have no answer, in asking order.
    pub fn missing_required(&self) -> Vec<QuestionId> {
        self.questions
            .iter()
            .filter(|q| q.required && !self.answers.contains(&q.id))
            .map(|q| q.id.clone())
            .collect()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Loading
    // ─────────────────────────────────────────────────────────────────────

    /// Starts a new session for a subcategory, discarding all prior state.
    pub fn begin_loading(&mut self, subcategory: SubcategoryId) {
        *self = Self::new();
        self.subcategory = Some(subcategory);
        self.status = FlowStatus::Loading;
    }

    /// Installs the loaded questions and moves to the first one.
    ///
    /// An empty list is treated as a load failure.
    pub fn questions_loaded(&mut self, set: QuestionSet) -> Result<(), FlowError> {
        if set.questions.is_empty() {
            return self.load_failed(FlowFailure::new(
                FailedAction::LoadQuestions,
                "No questions are available for this category",
            ));
        }
        self.transition(FlowStatus::Active)?;
        self.questions = set.questions;
        self.index = 0;
        self.seed_current();
        Ok(())
    }

    pub fn load_failed(&mut self, failure: FlowFailure) -> Result<(), FlowError> {
        self.transition(FlowStatus::Failed(failure))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Answering
    // ─────────────────────────────────────────────────────────────────────

    /// Records an answer, replacing any previous one for the question.
    pub fn set_answer(&mut self, question_id: &QuestionId, answer: Answer) -> Result<(), FlowError> {
        self.ensure_editable()?;
        let question = self.question(question_id)?;
        if !question.accepts(&answer) {
            return Err(FlowError::ShapeMismatch {
                question_id: question_id.clone(),
                expected: question.kind.answer_shape(),
                actual: answer.shape(),
            });
        }
        let answer = match (answer, question.range.as_ref()) {
            (Answer::Range(range), Some(bounds)) => Answer::Range(
                range
                    .with_min(bounds.normalize(range.min()))
                    .with_max(bounds.normalize(range.max())),
            ),
            (answer, _) => answer,
        };
        self.selected_presets.remove(question_id);
        self.answers.upsert(question_id.clone(), answer);
        Ok(())
    }

    /// Removes the answer for a question, if any.
    pub fn clear_answer(&mut self, question_id: &QuestionId) -> Result<(), FlowError> {
        self.ensure_editable()?;
        self.question(question_id)?;
        self.selected_presets.remove(question_id);
        self.answers.remove(question_id);
        Ok(())
    }

    /// Toggles one value of a multi-choice question.
    ///
    /// Selecting a selected value removes it; selecting a fourth value is a
    /// silent no-op. Deselecting the last value removes the answer entirely.
    /// Returns whether anything changed.
    pub fn toggle_selection(&mut self, question_id: &QuestionId, value: &str) -> Result<bool, FlowError> {
        self.ensure_editable()?;
        self.ensure_kind(question_id, QuestionKind::MultiChoice)?;

        let mut selection = self
            .answers
            .get(question_id)
            .and_then(Answer::as_multiple)
            .cloned()
            .unwrap_or_else(MultiSelection::new);

        if !selection.toggle(value) {
            return Ok(false);
        }
        if selection.is_empty() {
            self.answers.remove(question_id);
        } else {
            self.answers.upsert(question_id.clone(), Answer::Multiple(selection));
        }
        Ok(true)
    }

    /// Moves the lower bound of a range answer; see [`NumericRange::with_min`].
    pub fn adjust_range_min(&mut self, question_id: &QuestionId, value: f64) -> Result<NumericRange, FlowError> {
        self.adjust_range(question_id, |range, v| range.with_min(v), value)
    }

    /// Moves the upper bound of a range answer; see [`NumericRange::with_max`].
    pub fn adjust_range_max(&mut self, question_id: &QuestionId, value: f64) -> Result<NumericRange, FlowError> {
        self.adjust_range(question_id, |range, v| range.with_max(v), value)
    }

    /// Applies a named preset to a range question and marks it selected.
    pub fn select_preset(&mut self, question_id: &QuestionId, preset: usize) -> Result<NumericRange, FlowError> {
        self.ensure_editable()?;
        self.ensure_kind(question_id, QuestionKind::Range)?;
        let range = self
            .question(question_id)?
            .range
            .as_ref()
            .and_then(|bounds| bounds.presets.get(preset))
            .and_then(|p| p.to_range())
            .ok_or_else(|| FlowError::UnknownPreset {
                question_id: question_id.clone(),
                index: preset,
            })?;

        self.answers.upsert(question_id.clone(), Answer::Range(range));
        self.selected_presets.insert(question_id.clone(), preset);
        Ok(range)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────

    /// Advances one question. No-op on the last question or outside the
    /// editable phases. Returns whether the position changed.
    pub fn next(&mut self) -> bool {
        if !self.phase().is_editable() || self.index + 1 >= self.questions.len() {
            return false;
        }
        self.index += 1;
        self.seed_current();
        true
    }

    /// Goes back one question. No-op on the first question or outside the
    /// editable phases. Returns whether the position changed.
    pub fn previous(&mut self) -> bool {
        if !self.phase().is_editable() || self.index == 0 {
            return false;
        }
        self.index -= 1;
        self.seed_current();
        true
    }

    // ─────────────────────────────────────────────────────────────────────
    // Submission
    // ─────────────────────────────────────────────────────────────────────

    /// Moves to `Searching` and returns the subcategory to search.
    ///
    /// Legal from `Active`, or from `Failed` after a failed submit (retry),
    /// and only on the last question with every required question answered.
    pub fn begin_submit(&mut self) -> Result<SubcategoryId, FlowError> {
        if let FlowStatus::Failed(failure) = &self.status {
            if failure.action != FailedAction::Submit {
                return Err(FlowError::InvalidTransition {
                    from: FlowPhase::Failed,
                    to: FlowPhase::Searching,
                });
            }
        }
        let subcategory = self.subcategory.clone().ok_or(FlowError::NotLoaded)?;
        if !self.is_last() {
            return Err(FlowError::NotAtLastQuestion {
                index: self.index,
                count: self.questions.len(),
            });
        }
        let missing = self.missing_required();
        if !missing.is_empty() {
            return Err(FlowError::IncompleteAnswers(missing));
        }
        self.transition(FlowStatus::Searching)?;
        Ok(subcategory)
    }

    pub fn submit_succeeded(&mut self, result: RankedResult) -> Result<(), FlowError> {
        self.transition(FlowStatus::Results(result))
    }

    /// The server refused the search because free usage is exhausted.
    pub fn submit_blocked(&mut self) -> Result<(), FlowError> {
        self.transition(FlowStatus::Blocked)
    }

    /// The search failed; answers and position are kept for a retry.
    pub fn submit_failed(&mut self, failure: FlowFailure) -> Result<(), FlowError> {
        self.transition(FlowStatus::Failed(failure))
    }

    /// Leaves a failed submit and returns to answering.
    pub fn dismiss_failure(&mut self) -> Result<(), FlowError> {
        match &self.status {
            FlowStatus::Failed(f) if f.action == FailedAction::Submit => {
                self.transition(FlowStatus::Active)
            }
            _ => Err(FlowError::InvalidTransition {
                from: self.phase(),
                to: FlowPhase::Active,
            }),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────

    fn transition(&mut self, target: FlowStatus) -> Result<(), FlowError> {
        let from = self.phase();
        let to = target.phase();
        if !from.can_transition_to(&to) {
            return Err(FlowError::InvalidTransition { from, to });
        }
        tracing::debug!(%from, %to, "Question flow transition");
        self.status = target;
        Ok(())
    }

    fn ensure_editable(&self) -> Result<(), FlowError> {
        let phase = self.phase();
        if !phase.is_editable() {
            return Err(FlowError::NotEditable(phase));
        }
        if self.questions.is_empty() {
            return Err(FlowError::NotLoaded);
        }
        Ok(())
    }

    fn question(&self, question_id: &QuestionId) -> Result<&Question, FlowError> {
        self.questions
            .iter()
            .find(|q| &q.id == question_id)
            .ok_or_else(|| FlowError::UnknownQuestion(question_id.clone()))
    }

    fn ensure_kind(&self, question_id: &QuestionId, kind: QuestionKind) -> Result<(), FlowError> {
        let question = self.question(question_id)?;
        if question.kind == kind {
            Ok(())
        } else {
            Err(FlowError::ShapeMismatch {
                question_id: question_id.clone(),
                expected: question.kind.answer_shape(),
                actual: kind.answer_shape(),
            })
        }
    }

    fn adjust_range(
        &mut self,
        question_id: &QuestionId,
        apply: impl Fn(NumericRange, f64) -> NumericRange,
        value: f64,
    ) -> Result<NumericRange, FlowError> {
        self.ensure_editable()?;
        self.ensure_kind(question_id, QuestionKind::Range)?;
        if !value.is_finite() {
            return Err(FlowError::NonFiniteValue(question_id.clone()));
        }
        let bounds = self.question(question_id)?.range.clone();

        let value = match &bounds {
            Some(bounds) => bounds.normalize(value),
            None => value,
        };
        let current = self
            .answers
            .get(question_id)
            .and_then(Answer::as_range)
            .or_else(|| bounds.as_ref().and_then(|b| b.full_range()))
            .or_else(|| NumericRange::new(value, value).ok())
            .ok_or_else(|| FlowError::NonFiniteValue(question_id.clone()))?;

        let adjusted = apply(current, value);
        self.answers.upsert(question_id.clone(), Answer::Range(adjusted));
        self.selected_presets.remove(question_id);
        Ok(adjusted)
    }

    /// First display of a range question with presets seeds its answer
    /// with the first preset, unless it was already answered.
    fn seed_current(&mut self) {
        let Some(question) = self.questions.get(self.index) else {
            return;
        };
        if !self.displayed.insert(question.id.clone()) {
            return;
        }
        if question.kind != QuestionKind::Range || self.answers.contains(&question.id) {
            return;
        }
        let seeded = question
            .range
            .as_ref()
            .and_then(|bounds| bounds.first_preset())
            .and_then(|preset| preset.to_range());
        if let Some(range) = seeded {
            let id = question.id.clone();
            self.answers.upsert(id.clone(), Answer::Range(range));
            self.selected_presets.insert(id, 0);
        }
    }
}
