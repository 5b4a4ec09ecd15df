//! HTTP implementation of the `RecommendationApi` port.
//!
//! # Endpoints
//!
//! | Operation              | Method | Path                                   | Auth |
//! |------------------------|--------|----------------------------------------|------|
//! | register               | POST   | `/api/auth/register`                   | no   |
//! | get_user_status        | GET    | `/api/user/status`                     | yes  |
//! | get_categories         | GET    | `/api/categories?currency=`            | no   |
//! | get_questions          | GET    | `/api/subcategories/{id}/questions`    | no   |
//! | search                 | POST   | `/api/search`                          | yes  |
//! | get_subscription_plans | GET    | `/api/subscriptions/plans?currency=`   | no   |
//! | validate_receipt       | POST   | `/api/subscriptions/validate`          | yes  |
//! | restore_purchases      | POST   | `/api/subscriptions/restore`           | yes  |

use async_trait::async_trait;
use secrecy::SecretString;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{Arc, RwLock};

use super::endpoint::Endpoint;
use super::envelope;
use crate::adapters::http::ReqwestTransport;
use crate::config::ApiConfig;
use crate::domain::account::{Plan, ReceiptRequest, Registration, UserStatus, ValidationResult};
use crate::domain::answers::AnswerSet;
use crate::domain::catalog::{Category, QuestionSet};
use crate::domain::foundation::{Currency, DeviceId, Region, SubcategoryId};
use crate::domain::search::{RankedResult, SearchRequest};
use crate::ports::{ApiError, HttpTransport, RecommendationApi, TransportError};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterRequest<'a> {
    device_id: &'a DeviceId,
    region: &'a Region,
    currency: &'a Currency,
}

/// Typed client for the recommendation backend.
///
/// Holds the base URL, the transport and the bearer token slot. The token is
/// only read while a request is being composed, so concurrent calls never
/// hold the lock across an await.
pub struct ApiClient {
    base_url: String,
    transport: Arc<dyn HttpTransport>,
    token: RwLock<Option<SecretString>>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("has_auth_token", &self.has_auth_token())
            .finish()
    }
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
            token: RwLock::new(None),
        }
    }

    /// Builds a client over [`ReqwestTransport`] from configuration.
    pub fn from_config(config: &ApiConfig) -> Result<Self, TransportError> {
        let transport = ReqwestTransport::with_timeout(config.timeout())?;
        Ok(Self::new(config.resolved_base_url(), Arc::new(transport)))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn current_token(&self) -> Option<SecretString> {
        self.token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    async fn execute<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T, ApiError> {
        let method = endpoint.method();
        let token = if endpoint.is_authenticated() {
            self.current_token()
        } else {
            None
        };
        let request = endpoint.build(&self.base_url, token.as_ref())?;
        let url = request.url.clone();

        tracing::debug!(%method, %url, "Sending API request");

        let response = self.transport.send(request).await.map_err(|e| {
            tracing::warn!(%method, %url, error = %e, "API request failed in transport");
            ApiError::from(e)
        })?;

        tracing::debug!(%method, %url, status = response.status, "API response received");

        envelope::interpret(&response).map_err(|e| {
            tracing::warn!(%method, %url, status = response.status, error = %e, "API call failed");
            e
        })
    }
}

#[async_trait]
impl RecommendationApi for ApiClient {
    async fn register(
        &self,
        device_id: &DeviceId,
        region: &Region,
        currency: &Currency,
    ) -> Result<Registration, ApiError> {
        let endpoint = Endpoint::post("/auth/register").json(&RegisterRequest {
            device_id,
            region,
            currency,
        })?;
        self.execute(endpoint).await
    }

    async fn get_user_status(&self) -> Result<UserStatus, ApiError> {
        self.execute(Endpoint::get("/user/status").authenticated())
            .await
    }

    async fn get_categories(&self, currency: &Currency) -> Result<Vec<Category>, ApiError> {
        self.execute(Endpoint::get("/categories").query("currency", currency.as_str()))
            .await
    }

    async fn get_questions(
        &self,
        subcategory_id: &SubcategoryId,
        currency: &Currency,
    ) -> Result<QuestionSet, ApiError> {
        let endpoint = Endpoint::get("/subcategories")
            .param(subcategory_id.as_str())
            .then("questions")
            .query("currency", currency.as_str());
        self.execute(endpoint).await
    }

    async fn search(
        &self,
        subcategory_id: &SubcategoryId,
        answers: &AnswerSet,
    ) -> Result<RankedResult, ApiError> {
        let body = SearchRequest {
            subcategory_id: subcategory_id.clone(),
            answers: answers.to_entries(),
        };
        let endpoint = Endpoint::post("/search").authenticated().json(&body)?;
        self.execute(endpoint).await
    }

    async fn get_subscription_plans(&self, currency: &Currency) -> Result<Vec<Plan>, ApiError> {
        self.execute(Endpoint::get("/subscriptions/plans").query("currency", currency.as_str()))
            .await
    }

    async fn validate_receipt(&self, receipt_data: &str) -> Result<ValidationResult, ApiError> {
        let endpoint = Endpoint::post("/subscriptions/validate")
            .authenticated()
            .json(&ReceiptRequest {
                receipt_data: receipt_data.to_string(),
            })?;
        self.execute(endpoint).await
    }

    async fn restore_purchases(&self, receipt_data: &str) -> Result<ValidationResult, ApiError> {
        let endpoint = Endpoint::post("/subscriptions/restore")
            .authenticated()
            .json(&ReceiptRequest {
                receipt_data: receipt_data.to_string(),
            })?;
        self.execute(endpoint).await
    }

    fn set_auth_token(&self, token: &str) {
        let mut slot = self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = Some(SecretString::new(token.to_string()));
    }

    fn clear_auth_token(&self) {
        let mut slot = self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = None;
    }

    fn has_auth_token(&self) -> bool {
        use secrecy::ExposeSecret;
        self.token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .as_ref()
            .is_some_and(|t| !t.expose_secret().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::MockTransport;
    use crate::domain::answers::Answer;
    use crate::domain::foundation::QuestionId;
    use crate::ports::HttpMethod;
    use serde_json::json;
    use std::time::Duration;

    const BASE: &str = "https://api.shortlist.test";

    fn client(transport: &MockTransport) -> ApiClient {
        ApiClient::new(BASE, Arc::new(transport.clone()))
    }

    fn gbp() -> Currency {
        Currency::new("GBP").unwrap()
    }

    fn registration_payload(token: &str) -> serde_json::Value {
        json!({
            "token": token,
            "user": {"id": "u1", "deviceId": "abc", "region": "UK", "currency": "GBP"}
        })
    }

    // ════════════════════════════════════════════════════════════════════════
    // Authentication
    // ════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn register_then_authenticated_call_sends_bearer() {
        let transport = MockTransport::new()
            .with_data(registration_payload("t1"))
            .with_data(json!({"searchesUsed": 1, "freeSearchLimit": 3, "isSubscribed": false}));
        let api = client(&transport);

        let registration = api
            .register(
                &DeviceId::new("abc").unwrap(),
                &Region::new("UK").unwrap(),
                &gbp(),
            )
            .await
            .unwrap();
        assert_eq!(registration.token, "t1");

        api.set_auth_token(&registration.token);
        let status = api.get_user_status().await.unwrap();
        assert_eq!(status.remaining_free_searches(), 2);

        let requests = transport.requests();
        assert_eq!(requests[0].method, HttpMethod::Post);
        assert_eq!(requests[0].url, "https://api.shortlist.test/api/auth/register");
        assert_eq!(
            requests[0].json_body(),
            Some(json!({"deviceId": "abc", "region": "UK", "currency": "GBP"}))
        );
        assert_eq!(requests[0].header("authorization"), None);
        assert_eq!(requests[1].header("authorization"), Some("Bearer t1"));
    }

    #[tokio::test]
    async fn no_token_means_no_authorization_header() {
        let transport = MockTransport::new().with_raw(401, "");
        let api = client(&transport);

        let result = api.get_user_status().await;

        assert_eq!(result, Err(ApiError::Unauthorized));
        assert_eq!(transport.last_request().unwrap().header("authorization"), None);
    }

    #[tokio::test]
    async fn cleared_token_is_not_sent() {
        let transport = MockTransport::new().with_raw(401, "");
        let api = client(&transport);
        api.set_auth_token("t1");
        assert!(api.has_auth_token());

        api.clear_auth_token();
        let _ = api.get_user_status().await;

        assert!(!api.has_auth_token());
        assert_eq!(transport.last_request().unwrap().header("authorization"), None);
    }

    #[tokio::test]
    async fn public_endpoints_never_send_token() {
        let transport = MockTransport::new().with_data(json!([]));
        let api = client(&transport);
        api.set_auth_token("t1");

        let categories = api.get_categories(&gbp()).await.unwrap();

        assert!(categories.is_empty());
        let request = transport.last_request().unwrap();
        assert_eq!(request.header("authorization"), None);
        assert_eq!(request.url, "https://api.shortlist.test/api/categories?currency=GBP");
    }

    // ════════════════════════════════════════════════════════════════════════
    // Operations
    // ════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn get_questions_targets_subcategory() {
        let transport = MockTransport::new().with_data(json!({
            "subcategoryId": "laptops",
            "questions": [
                {"id": "budget", "text": "Budget?", "type": "range", "required": true,
                 "range": {"min": 0.0, "max": 3000.0, "step": 50.0}}
            ]
        }));
        let api = client(&transport);

        let set = api
            .get_questions(&SubcategoryId::new("laptops").unwrap(), &gbp())
            .await
            .unwrap();

        assert_eq!(set.questions.len(), 1);
        assert_eq!(
            transport.last_request().unwrap().url,
            "https://api.shortlist.test/api/subcategories/laptops/questions?currency=GBP"
        );
    }

    #[tokio::test]
    async fn search_posts_answers() {
        let transport = MockTransport::new().with_data(json!({
            "items": [{"rank": 1, "name": "Air", "matchScore": 92}],
            "summary": "One pick"
        }));
        let api = client(&transport);
        api.set_auth_token("t1");

        let answers: AnswerSet = [(QuestionId::new("use").unwrap(), Answer::single("work"))]
            .into_iter()
            .collect();
        let result = api
            .search(&SubcategoryId::new("laptops").unwrap(), &answers)
            .await
            .unwrap();

        assert_eq!(result.top_pick().unwrap().name, "Air");
        let request = transport.last_request().unwrap();
        assert_eq!(request.header("authorization"), Some("Bearer t1"));
        assert_eq!(
            request.json_body(),
            Some(json!({
                "subcategoryId": "laptops",
                "answers": [{"questionId": "use", "value": "work"}]
            }))
        );
    }

    #[tokio::test]
    async fn receipts_are_sent_as_receipt_data() {
        let transport = MockTransport::new()
            .with_data(json!({"valid": true, "isSubscribed": true, "productId": "pro.monthly"}))
            .with_data(json!({"valid": false}));
        let api = client(&transport);
        api.set_auth_token("t1");

        let validated = api.validate_receipt("r1").await.unwrap();
        let restored = api.restore_purchases("r2").await.unwrap();

        assert!(validated.grants_entitlement());
        assert!(!restored.grants_entitlement());
        let requests = transport.requests();
        assert!(requests[0].url.ends_with("/api/subscriptions/validate"));
        assert_eq!(requests[0].json_body(), Some(json!({"receiptData": "r1"})));
        assert!(requests[1].url.ends_with("/api/subscriptions/restore"));
    }

    // ════════════════════════════════════════════════════════════════════════
    // Error classification
    // ════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn search_limit_reached() {
        let transport = MockTransport::new().with_api_error(403, "LIMIT_REACHED", "Free limit reached");
        let api = client(&transport);
        api.set_auth_token("t1");

        let result = api
            .search(&SubcategoryId::new("laptops").unwrap(), &AnswerSet::new())
            .await;

        assert_eq!(result, Err(ApiError::LimitReached));
    }

    #[tokio::test]
    async fn null_data_is_no_data() {
        let transport = MockTransport::new().with_data(serde_json::Value::Null);
        let api = client(&transport);

        assert_eq!(api.get_categories(&gbp()).await, Err(ApiError::NoData));
    }

    #[tokio::test]
    async fn transport_failure_is_network_error() {
        let transport =
            MockTransport::new().with_error(TransportError::Timeout(Duration::from_secs(30)));
        let api = client(&transport);

        let result = api.get_subscription_plans(&gbp()).await;

        assert!(matches!(result, Err(ApiError::NetworkError(_))));
    }

    #[tokio::test]
    async fn malformed_base_fails_before_sending() {
        let transport = MockTransport::new();
        let api = ApiClient::new("::nonsense::", Arc::new(transport.clone()));

        let result = api.get_categories(&gbp()).await;

        assert_eq!(result, Err(ApiError::InvalidEndpoint));
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn server_status_without_envelope() {
        let transport = MockTransport::new().with_raw(500, "boom");
        let api = client(&transport);

        assert_eq!(
            api.get_categories(&gbp()).await,
            Err(ApiError::server("Server error: 500"))
        );
    }

    #[test]
    fn debug_output_hides_token() {
        let api = client(&MockTransport::new());
        api.set_auth_token("super-secret");
        let rendered = format!("{:?}", api);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("has_auth_token: true"));
    }
}
