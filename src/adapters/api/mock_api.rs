//! Mock recommendation API for testing.
//!
//! Provides a configurable in-process implementation of the
//! `RecommendationApi` port, so the flow engine and the application handlers
//! can be tested without HTTP.
//!
//! # Features
//!
//! - Queued search and question results (consumed in order)
//! - Token checks on authenticated operations, with rejectable tokens
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let api = MockRecommendationApi::new()
//!     .with_questions(question_set)
//!     .with_search_result(Err(ApiError::LimitReached));
//!
//! let engine = AnswerFlowEngine::new(Arc::new(api.clone()));
//! ```

use async_trait::async_trait;
use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex};

use crate::domain::account::{Plan, Registration, User, UserStatus, ValidationResult};
use crate::domain::answers::AnswerSet;
use crate::domain::catalog::{Category, QuestionSet};
use crate::domain::foundation::{Currency, DeviceId, Region, SubcategoryId, UserId};
use crate::domain::search::RankedResult;
use crate::ports::{ApiError, RecommendationApi};

/// A recorded call.
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    Register { device_id: String },
    GetUserStatus,
    GetCategories { currency: String },
    GetQuestions { subcategory_id: String },
    Search { subcategory_id: String, answers: AnswerSet },
    GetSubscriptionPlans { currency: String },
    ValidateReceipt { receipt_data: String },
    RestorePurchases { receipt_data: String },
}

#[derive(Debug, Default)]
struct MockState {
    token: Option<String>,
    rejected_tokens: HashSet<String>,
    registrations: u32,
    registration_error: Option<ApiError>,
    user_status: Option<Result<UserStatus, ApiError>>,
    categories: Vec<Category>,
    plans: Vec<Plan>,
    questions: VecDeque<Result<QuestionSet, ApiError>>,
    search_results: VecDeque<Result<RankedResult, ApiError>>,
    validations: VecDeque<Result<ValidationResult, ApiError>>,
    calls: Vec<MockCall>,
}

/// In-process recommendation API.
///
/// Clones share state, so a test can keep a handle for assertions after
/// passing the mock into the code under test.
#[derive(Debug, Clone, Default)]
pub struct MockRecommendationApi {
    state: Arc<Mutex<MockState>>,
}

impl MockRecommendationApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a question set for the next `get_questions`.
    pub fn with_questions(self, set: QuestionSet) -> Self {
        self.state.lock().unwrap().questions.push_back(Ok(set));
        self
    }

    /// Queues a failure for the next `get_questions`.
    pub fn with_questions_error(self, error: ApiError) -> Self {
        self.state.lock().unwrap().questions.push_back(Err(error));
        self
    }

    /// Queues the outcome of the next `search`.
    pub fn with_search_result(self, result: Result<RankedResult, ApiError>) -> Self {
        self.state.lock().unwrap().search_results.push_back(result);
        self
    }

    pub fn with_user_status(self, status: UserStatus) -> Self {
        self.state.lock().unwrap().user_status = Some(Ok(status));
        self
    }

    pub fn with_user_status_error(self, error: ApiError) -> Self {
        self.state.lock().unwrap().user_status = Some(Err(error));
        self
    }

    pub fn with_categories(self, categories: Vec<Category>) -> Self {
        self.state.lock().unwrap().categories = categories;
        self
    }

    pub fn with_plans(self, plans: Vec<Plan>) -> Self {
        self.state.lock().unwrap().plans = plans;
        self
    }

    /// Queues the outcome of the next receipt validation or restore.
    pub fn with_validation(self, result: Result<ValidationResult, ApiError>) -> Self {
        self.state.lock().unwrap().validations.push_back(result);
        self
    }

    /// Makes every registration fail.
    pub fn with_registration_error(self, error: ApiError) -> Self {
        self.state.lock().unwrap().registration_error = Some(error);
        self
    }

    /// Authenticated calls presenting this token fail with `Unauthorized`.
    pub fn reject_token(&self, token: &str) {
        self.state
            .lock()
            .unwrap()
            .rejected_tokens
            .insert(token.to_string());
    }

    /// Token that the next successful registration will hand out.
    pub fn next_token(&self) -> String {
        format!("mock-token-{}", self.state.lock().unwrap().registrations + 1)
    }

    pub fn current_token(&self) -> Option<String> {
        self.state.lock().unwrap().token.clone()
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state.lock().unwrap().calls.len()
    }

    pub fn registration_count(&self) -> u32 {
        self.state.lock().unwrap().registrations
    }

    fn record(&self, call: MockCall) {
        self.state.lock().unwrap().calls.push(call);
    }

    fn authorize(&self) -> Result<(), ApiError> {
        let state = self.state.lock().unwrap();
        match &state.token {
            Some(token) if !token.is_empty() && !state.rejected_tokens.contains(token) => Ok(()),
            _ => Err(ApiError::Unauthorized),
        }
    }

    fn next_validation(&self) -> Result<ValidationResult, ApiError> {
        self.state
            .lock()
            .unwrap()
            .validations
            .pop_front()
            .unwrap_or(Err(ApiError::NoData))
    }
}

#[async_trait]
impl RecommendationApi for MockRecommendationApi {
    async fn register(
        &self,
        device_id: &DeviceId,
        region: &Region,
        currency: &Currency,
    ) -> Result<Registration, ApiError> {
        self.record(MockCall::Register {
            device_id: device_id.as_str().to_string(),
        });

        let mut state = self.state.lock().unwrap();
        if let Some(error) = state.registration_error.clone() {
            return Err(error);
        }
        state.registrations += 1;
        let n = state.registrations;

        Ok(Registration {
            token: format!("mock-token-{}", n),
            user: User {
                id: UserId::new(format!("user-{}", n)).map_err(ApiError::decoding)?,
                device_id: Some(device_id.clone()),
                region: Some(region.clone()),
                currency: Some(currency.clone()),
                created_at: None,
            },
        })
    }

    async fn get_user_status(&self) -> Result<UserStatus, ApiError> {
        self.record(MockCall::GetUserStatus);
        self.authorize()?;
        self.state
            .lock()
            .unwrap()
            .user_status
            .clone()
            .unwrap_or(Err(ApiError::NoData))
    }

    async fn get_categories(&self, currency: &Currency) -> Result<Vec<Category>, ApiError> {
        self.record(MockCall::GetCategories {
            currency: currency.as_str().to_string(),
        });
        Ok(self.state.lock().unwrap().categories.clone())
    }

    async fn get_questions(
        &self,
        subcategory_id: &SubcategoryId,
        _currency: &Currency,
    ) -> Result<QuestionSet, ApiError> {
        self.record(MockCall::GetQuestions {
            subcategory_id: subcategory_id.as_str().to_string(),
        });
        self.state
            .lock()
            .unwrap()
            .questions
            .pop_front()
            .unwrap_or(Err(ApiError::NoData))
    }

    async fn search(
        &self,
        subcategory_id: &SubcategoryId,
        answers: &AnswerSet,
    ) -> Result<RankedResult, ApiError> {
        self.record(MockCall::Search {
            subcategory_id: subcategory_id.as_str().to_string(),
            answers: answers.clone(),
        });
        self.authorize()?;
        self.state
            .lock()
            .unwrap()
            .search_results
            .pop_front()
            .unwrap_or(Err(ApiError::NoData))
    }

    async fn get_subscription_plans(&self, currency: &Currency) -> Result<Vec<Plan>, ApiError> {
        self.record(MockCall::GetSubscriptionPlans {
            currency: currency.as_str().to_string(),
        });
        Ok(self.state.lock().unwrap().plans.clone())
    }

    async fn validate_receipt(&self, receipt_data: &str) -> Result<ValidationResult, ApiError> {
        self.record(MockCall::ValidateReceipt {
            receipt_data: receipt_data.to_string(),
        });
        self.authorize()?;
        self.next_validation()
    }

    async fn restore_purchases(&self, receipt_data: &str) -> Result<ValidationResult, ApiError> {
        self.record(MockCall::RestorePurchases {
            receipt_data: receipt_data.to_string(),
        });
        self.authorize()?;
        self.next_validation()
    }

    fn set_auth_token(&self, token: &str) {
        self.state.lock().unwrap().token = Some(token.to_string());
    }

    fn clear_auth_token(&self) {
        self.state.lock().unwrap().token = None;
    }

    fn has_auth_token(&self) -> bool {
        self.state
            .lock()
            .unwrap()
            .token
            .as_ref()
            .is_some_and(|t| !t.is_empty())
    }
}
