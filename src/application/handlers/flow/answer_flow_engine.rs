//! AnswerFlowEngine - drives a question flow against the recommendation API.
//!
//! The domain `QuestionFlow` owns every state rule. The engine adds the two
//! operations that need the network (loading questions and submitting) and
//! maps API failures onto flow states:
//!
//! - `LimitReached` on submit -> `Blocked`
//! - `Unauthorized` -> `Failed` with `requires_reauthentication`
//! - anything else -> `Failed` with a user-facing message

use std::sync::Arc;

use crate::domain::answers::{Answer, AnswerSet, NumericRange};
use crate::domain::catalog::Question;
use crate::domain::flow::{FailedAction, FlowError, FlowFailure, FlowPhase, FlowStatus, QuestionFlow};
use crate::domain::foundation::{Currency, QuestionId, SubcategoryId};
use crate::domain::search::RankedResult;
use crate::ports::{ApiError, RecommendationApi};

/// Question/answer session bound to an API.
pub struct AnswerFlowEngine {
    api: Arc<dyn RecommendationApi>,
    flow: QuestionFlow,
}

impl AnswerFlowEngine {
    pub fn new(api: Arc<dyn RecommendationApi>) -> Self {
        Self {
            api,
            flow: QuestionFlow::new(),
        }
    }

    /// Read access to the full flow state.
    pub fn flow(&self) -> &QuestionFlow {
        &self.flow
    }

    pub fn status(&self) -> &FlowStatus {
        self.flow.status()
    }

    pub fn phase(&self) -> FlowPhase {
        self.flow.phase()
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.flow.current_question()
    }

    pub fn answers(&self) -> &AnswerSet {
        self.flow.answers()
    }

    pub fn result(&self) -> Option<&RankedResult> {
        self.flow.result()
    }

    pub fn can_advance(&self) -> bool {
        self.flow.can_advance()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Network operations
    // ─────────────────────────────────────────────────────────────────────

    /// Starts a fresh session for `subcategory` and fetches its questions.
    ///
    /// Prior answers, position and result are discarded first. A failed
    /// fetch leaves the flow in `Failed`; this only returns `Err` for
    /// contract violations.
    pub async fn load_questions(
        &mut self,
        subcategory: SubcategoryId,
        currency: &Currency,
    ) -> Result<&FlowStatus, FlowError> {
        self.flow.begin_loading(subcategory.clone());

        match self.api.get_questions(&subcategory, currency).await {
            Ok(set) => {
                tracing::info!(
                    subcategory = %subcategory,
                    questions = set.questions.len(),
                    "Questions loaded"
                );
                self.flow.questions_loaded(set)?;
            }
            Err(err) => {
                tracing::warn!(subcategory = %subcategory, error = %err, "Loading questions failed");
                self.flow
                    .load_failed(failure_from(FailedAction::LoadQuestions, &err))?;
            }
        }

        Ok(self.flow.status())
    }

    /// Submits the answers for ranking.
    ///
    /// Legal on the last question with every required question answered,
    /// and again after a failed submit (retry). Answers and position are
    /// never modified.
    pub async fn submit(&mut self) -> Result<&FlowStatus, FlowError> {
        let subcategory = self.flow.begin_submit()?;
        let outcome = self.api.search(&subcategory, self.flow.answers()).await;

        match outcome {
            Ok(result) => {
                tracing::info!(
                    subcategory = %subcategory,
                    items = result.items.len(),
                    "Search completed"
                );
                self.flow.submit_succeeded(result)?;
            }
            Err(ApiError::LimitReached) => {
                tracing::info!(subcategory = %subcategory, "Search blocked by free limit");
                self.flow.submit_blocked()?;
            }
            Err(err) => {
                tracing::warn!(subcategory = %subcategory, error = %err, "Search failed");
                self.flow
                    .submit_failed(failure_from(FailedAction::Submit, &err))?;
            }
        }

        Ok(self.flow.status())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Local operations
    // ─────────────────────────────────────────────────────────────────────

    pub fn set_answer(&mut self, question_id: &QuestionId, answer: Answer) -> Result<(), FlowError> {
        self.flow.set_answer(question_id, answer)
    }

    pub fn clear_answer(&mut self, question_id: &QuestionId) -> Result<(), FlowError> {
        self.flow.clear_answer(question_id)
    }

    /// Toggles a multi-choice value. Returns whether the selection changed;
    /// adding to a full selection is a no-op and returns `false`.
    pub fn toggle_selection(&mut self, question_id: &QuestionId, value: &str) -> Result<bool, FlowError> {
        self.flow.toggle_selection(question_id, value)
    }

    pub fn adjust_range_min(&mut self, question_id: &QuestionId, value: f64) -> Result<NumericRange, FlowError> {
        self.flow.adjust_range_min(question_id, value)
    }

    pub fn adjust_range_max(&mut self, question_id: &QuestionId, value: f64) -> Result<NumericRange, FlowError> {
        self.flow.adjust_range_max(question_id, value)
    }

    pub fn select_preset(&mut self, question_id: &QuestionId, preset: usize) -> Result<NumericRange, FlowError> {
        self.flow.select_preset(question_id, preset)
    }

    pub fn next(&mut self) -> bool {
        self.flow.next()
    }

    pub fn previous(&mut self) -> bool {
        self.flow.previous()
    }

    pub fn dismiss_failure(&mut self) -> Result<(), FlowError> {
        self.flow.dismiss_failure()
    }
}

fn failure_from(action: FailedAction, err: &ApiError) -> FlowFailure {
    let failure = FlowFailure::new(action, err.user_message());
    if err.requires_reauthentication() {
        failure.with_reauthentication()
    } else {
        failure
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::api::{MockCall, MockRecommendationApi};
    use crate::domain::catalog::QuestionSet;
    use crate::domain::search::RankedItem;
    use serde_json::json;

    // ════════════════════════════════════════════════════════════════════════════
    // Test Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn question_set() -> QuestionSet {
        serde_json::from_value(json!({
            "subcategoryId": "laptops",
            "questions": [
                {"id": "use", "text": "Main use?", "type": "single_choice", "required": true,
                 "options": [{"value": "work", "label": "Work"}, {"value": "gaming", "label": "Gaming"}]},
                {"id": "brands", "text": "Brands?", "type": "multi_choice", "required": false,
                 "options": [{"value": "a", "label": "A"}, {"value": "b", "label": "B"}]}
            ]
        }))
        .unwrap()
    }

    fn ranked() -> RankedResult {
        RankedResult {
            items: vec![serde_json::from_value::<RankedItem>(json!({
                "rank": 1, "name": "Air", "matchScore": 90
            }))
            .unwrap()],
            ..Default::default()
        }
    }

    fn laptops() -> SubcategoryId {
        SubcategoryId::new("laptops").unwrap()
    }

    fn gbp() -> Currency {
        Currency::new("GBP").unwrap()
    }

    fn qid(id: &str) -> QuestionId {
        QuestionId::new(id).unwrap()
    }

    async fn answered_engine(api: &MockRecommendationApi) -> AnswerFlowEngine {
        api.set_auth_token("t1");
        let mut engine = AnswerFlowEngine::new(Arc::new(api.clone()));
        engine.load_questions(laptops(), &gbp()).await.unwrap();
        engine.set_answer(&qid("use"), Answer::single("work")).unwrap();
        engine.next();
        engine
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Loading
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn load_moves_to_first_question() {
        let api = MockRecommendationApi::new().with_questions(question_set());
        let mut engine = AnswerFlowEngine::new(Arc::new(api.clone()));

        let status = engine.load_questions(laptops(), &gbp()).await.unwrap();

        assert_eq!(status.phase(), FlowPhase::Active);
        assert_eq!(engine.current_question().unwrap().id.as_str(), "use");
        assert!(!engine.can_advance());
        assert_eq!(
            api.calls(),
            vec![MockCall::GetQuestions {
                subcategory_id: "laptops".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn load_failure_moves_to_failed() {
        let api = MockRecommendationApi::new().with_questions_error(ApiError::network("offline"));
        let mut engine = AnswerFlowEngine::new(Arc::new(api));

        engine.load_questions(laptops(), &gbp()).await.unwrap();

        let failure = engine.flow().failure().unwrap();
        assert_eq!(failure.action, FailedAction::LoadQuestions);
        assert!(!failure.requires_reauthentication);
    }

    #[tokio::test]
    async fn reloading_discards_previous_answers() {
        let api = MockRecommendationApi::new()
            .with_questions(question_set())
            .with_questions(question_set());
        let mut engine = AnswerFlowEngine::new(Arc::new(api));
        engine.load_questions(laptops(), &gbp()).await.unwrap();
        engine.set_answer(&qid("use"), Answer::single("work")).unwrap();

        engine.load_questions(laptops(), &gbp()).await.unwrap();

        assert!(engine.answers().is_empty());
        assert_eq!(engine.flow().current_index(), 0);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Submission
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn submit_success_shows_results() {
        let api = MockRecommendationApi::new()
            .with_questions(question_set())
            .with_search_result(Ok(ranked()));
        let mut engine = answered_engine(&api).await;

        let status = engine.submit().await.unwrap();

        assert_eq!(status.phase(), FlowPhase::Results);
        assert_eq!(engine.result().unwrap().top_pick().unwrap().name, "Air");
    }

    #[tokio::test]
    async fn limit_reached_blocks_and_keeps_answers() {
        let api = MockRecommendationApi::new()
            .with_questions(question_set())
            .with_search_result(Err(ApiError::LimitReached));
        let mut engine = answered_engine(&api).await;
        let before = engine.answers().clone();

        let status = engine.submit().await.unwrap();

        assert_eq!(status.phase(), FlowPhase::Blocked);
        assert_eq!(engine.answers(), &before);
        assert_eq!(engine.flow().current_index(), 1);
    }

    #[tokio::test]
    async fn failure_then_retry_succeeds() {
        let api = MockRecommendationApi::new()
            .with_questions(question_set())
            .with_search_result(Err(ApiError::server("Server error: 503")))
            .with_search_result(Ok(ranked()));
        let mut engine = answered_engine(&api).await;

        engine.submit().await.unwrap();
        assert_eq!(engine.phase(), FlowPhase::Failed);
        assert_eq!(engine.flow().failure().unwrap().message, "Server error: 503");

        engine.submit().await.unwrap();
        assert_eq!(engine.phase(), FlowPhase::Results);
    }

    #[tokio::test]
    async fn unauthorized_submit_requests_reauthentication() {
        let api = MockRecommendationApi::new().with_questions(question_set());
        let mut engine = answered_engine(&api).await;
        api.reject_token("t1");

        engine.submit().await.unwrap();

        let failure = engine.flow().failure().unwrap();
        assert_eq!(failure.action, FailedAction::Submit);
        assert!(failure.requires_reauthentication);
    }

    #[tokio::test]
    async fn submit_before_last_question_is_rejected() {
        let api = MockRecommendationApi::new().with_questions(question_set());
        let mut engine = AnswerFlowEngine::new(Arc::new(api.clone()));
        engine.load_questions(laptops(), &gbp()).await.unwrap();
        engine.set_answer(&qid("use"), Answer::single("work")).unwrap();

        let result = engine.submit().await;

        assert!(matches!(result, Err(FlowError::NotAtLastQuestion { .. })));
        assert!(!api
            .calls()
            .iter()
            .any(|c| matches!(c, MockCall::Search { .. })));
    }

    #[tokio::test]
    async fn submit_sends_answer_set() {
        let api = MockRecommendationApi::new()
            .with_questions(question_set())
            .with_search_result(Ok(ranked()));
        let mut engine = answered_engine(&api).await;
        engine.toggle_selection(&qid("brands"), "a").unwrap();

        engine.submit().await.unwrap();

        let (subcategory, search) = api
            .calls()
            .into_iter()
            .find_map(|c| match c {
                MockCall::Search {
                    subcategory_id,
                    answers,
                } => Some((subcategory_id, answers)),
                _ => None,
            })
            .unwrap();
        assert_eq!(subcategory, "laptops");
        assert_eq!(&search, engine.answers());
        assert_eq!(search.len(), 2);
        assert_eq!(search.get(&qid("use")), Some(&Answer::single("work")));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Local operations
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn toggle_reports_change_not_selection() {
        let api = MockRecommendationApi::new().with_questions(question_set());
        let mut engine = answered_engine(&api).await;
        let brands = qid("brands");

        assert!(engine.toggle_selection(&brands, "a").unwrap());
        assert!(engine.toggle_selection(&brands, "a").unwrap());

        assert!(engine.answers().get(&brands).is_none());
    }
}
