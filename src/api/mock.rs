//! # Mock API
//!
//! Scripted [`ApiClient`] for testing repositories and state holders without a server.
//!
//! Queue expectations in the order the code under test will issue requests,
//! then hand the mock to the component:
//!
//! ```ignore
//! let mock = Arc::new(MockApiClient::new());
//! mock.expect(Endpoint::Login).return_ok(session);
//! mock.expect(Endpoint::GetProfile).return_status(500, "Database unavailable");
//!
//! let repository = ApiAuthRepository::new(mock.clone(), tokens);
//! // drive the repository...
//! mock.verify(); // Ensures all expectations were met
//! ```
//!
//! Each request records a call for its [`Endpoint`] as soon as it is polled.
//! [`ExpectationBuilder::held_until`] keeps a response in flight until a
//! [`Notify`] fires, which is how cancellation tests observe abandoned requests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::Notify;

use super::{ApiClient, ApiError, ApiResponse, ApiResult, ErrorBody};
use crate::model::{
    AppVersion, AuthToken, LoginRequest, Member, NewPost, PhotoUpload, Post, Profile,
    ProfileUpdate, RegisterRequest, SearchQuery, Session, Settings, UploadedPhoto,
};

/// One [`ApiClient`] method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Register,
    Login,
    Logout,
    GetProfile,
    UpdateProfile,
    UploadPhoto,
    SearchMembers,
    GetSettings,
    UpdateSettings,
    CreatePost,
    ListPosts,
    CheckAppVersion,
}

/// An expected request and the scripted reply.
struct Expectation {
    endpoint: Endpoint,
    response: Result<ApiResponse<Value>, ApiError>,
    gate: Option<Arc<Notify>>,
}

/// A mock client with expectation tracking for fluent testing.
#[derive(Default)]
pub struct MockApiClient {
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
    calls: Mutex<Vec<Endpoint>>,
    searches: Mutex<Vec<SearchQuery>>,
    completed: AtomicUsize,
}

impl MockApiClient {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues an expected request for `endpoint`.
    pub fn expect(&self, endpoint: Endpoint) -> ExpectationBuilder {
        ExpectationBuilder {
            endpoint,
            gate: None,
            expectations: self.expectations.clone(),
        }
    }

    /// Number of requests issued for `endpoint`.
    pub fn calls(&self, endpoint: Endpoint) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| **call == endpoint)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Search queries in the order they were sent.
    pub fn searches(&self) -> Vec<SearchQuery> {
        self.searches.lock().unwrap().clone()
    }

    /// Number of requests that ran to the point of producing a response.
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }

    async fn respond<T: DeserializeOwned>(&self, endpoint: Endpoint) -> ApiResult<T> {
        self.calls.lock().unwrap().push(endpoint);
        let expectation = self.expectations.lock().unwrap().pop_front();

        let expectation = match expectation {
            Some(exp) if exp.endpoint == endpoint => exp,
            Some(exp) => panic!(
                "Unexpected request: expected {:?}, got {:?}",
                exp.endpoint, endpoint
            ),
            None => panic!("Unexpected request: {endpoint:?} (no expectations left)"),
        };

        if let Some(gate) = expectation.gate {
            gate.notified().await;
        }
        self.completed.fetch_add(1, Ordering::SeqCst);

        let response = expectation.response?;
        let body = match response.body {
            Some(value) => Some(serde_json::from_value(value)?),
            None => None,
        };
        Ok(ApiResponse {
            status: response.status,
            body,
            error: response.error,
        })
    }
}

/// Builder returned by [`MockApiClient::expect`].
pub struct ExpectationBuilder {
    endpoint: Endpoint,
    gate: Option<Arc<Notify>>,
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
}

impl ExpectationBuilder {
    /// Holds the reply until `gate` is notified.
    pub fn held_until(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Replies `200` with `body` serialized as JSON.
    pub fn return_ok(self, body: impl Serialize) {
        let body = serde_json::to_value(body).unwrap();
        self.push(Ok(ApiResponse::ok(body)));
    }

    /// Replies with `status` and no body.
    pub fn return_empty(self, status: u16) {
        self.push(Ok(ApiResponse::empty(status)));
    }

    /// Replies with a non-2xx `status` and an error payload.
    pub fn return_status(self, status: u16, message: impl Into<String>) {
        self.push(Ok(ApiResponse::failure(
            status,
            Some(ErrorBody::with_message(message)),
        )));
    }

    /// Fails before any response, like a dropped connection.
    pub fn return_err(self, error: ApiError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<ApiResponse<Value>, ApiError>) {
        self.expectations.lock().unwrap().push_back(Expectation {
            endpoint: self.endpoint,
            response,
            gate: self.gate,
        });
    }
}

#[async_trait]
impl ApiClient for MockApiClient {
    async fn register(&self, _request: RegisterRequest) -> ApiResult<Session> {
        self.respond(Endpoint::Register).await
    }

    async fn login(&self, _request: LoginRequest) -> ApiResult<Session> {
        self.respond(Endpoint::Login).await
    }

    async fn logout(&self, _token: AuthToken) -> ApiResult<()> {
        self.respond(Endpoint::Logout).await
    }

    async fn get_profile(&self, _token: AuthToken) -> ApiResult<Profile> {
        self.respond(Endpoint::GetProfile).await
    }

    async fn update_profile(&self, _token: AuthToken, _update: ProfileUpdate) -> ApiResult<Profile> {
        self.respond(Endpoint::UpdateProfile).await
    }

    async fn upload_photo(&self, _token: AuthToken, _photo: PhotoUpload) -> ApiResult<UploadedPhoto> {
        self.respond(Endpoint::UploadPhoto).await
    }

    async fn search_members(&self, _token: AuthToken, query: SearchQuery) -> ApiResult<Vec<Member>> {
        self.searches.lock().unwrap().push(query);
        self.respond(Endpoint::SearchMembers).await
    }

    async fn get_settings(&self, _token: AuthToken) -> ApiResult<Settings> {
        self.respond(Endpoint::GetSettings).await
    }

    async fn update_settings(&self, _token: AuthToken, _settings: Settings) -> ApiResult<Settings> {
        self.respond(Endpoint::UpdateSettings).await
    }

    async fn create_post(&self, _token: AuthToken, _post: NewPost) -> ApiResult<Post> {
        self.respond(Endpoint::CreatePost).await
    }

    async fn list_posts(&self, _token: AuthToken, _page: u32) -> ApiResult<Vec<Post>> {
        self.respond(Endpoint::ListPosts).await
    }

    async fn check_app_version(&self, _platform: String) -> ApiResult<AppVersion> {
        self.respond(Endpoint::CheckAppVersion).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Settings;

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        let mock = MockApiClient::new();
        mock.expect(Endpoint::GetSettings).return_ok(Settings::default());
        mock.expect(Endpoint::Logout).return_empty(204);

        let settings = mock
            .get_settings(AuthToken::new("t"))
            .await
            .and_then(ApiResponse::into_result)
            .unwrap();
        assert_eq!(settings, Settings::default());

        let ack = mock.logout(AuthToken::new("t")).await.unwrap().into_ack();
        assert_eq!(ack, Ok(()));

        assert_eq!(mock.calls(Endpoint::GetSettings), 1);
        assert_eq!(mock.total_calls(), 2);
        mock.verify();
    }

    #[tokio::test]
    async fn scripted_failures_are_replayed() {
        let mock = MockApiClient::new();
        mock.expect(Endpoint::CheckAppVersion)
            .return_err(ApiError::Network("timeout".to_string()));
        mock.expect(Endpoint::CheckAppVersion).return_status(503, "Maintenance");

        let first = mock.check_app_version("android".to_string()).await;
        assert_eq!(first, Err(ApiError::Network("timeout".to_string())));

        let second = mock
            .check_app_version("android".to_string())
            .await
            .unwrap()
            .into_result();
        assert_eq!(second.unwrap_err().to_string(), "Maintenance");
    }

    #[tokio::test]
    async fn held_reply_waits_for_gate() {
        let mock = Arc::new(MockApiClient::new());
        let gate = Arc::new(Notify::new());
        mock.expect(Endpoint::GetSettings)
            .held_until(gate.clone())
            .return_ok(Settings::default());

        let task = {
            let mock = mock.clone();
            tokio::spawn(async move { mock.get_settings(AuthToken::new("t")).await })
        };
        tokio::task::yield_now().await;
        while mock.total_calls() == 0 {
            tokio::task::yield_now().await;
        }
        assert_eq!(mock.completed(), 0);

        gate.notify_one();
        assert!(task.await.unwrap().is_ok());
        assert_eq!(mock.completed(), 1);
    }

    #[tokio::test]
    #[should_panic(expected = "Not all expectations were met")]
    async fn verify_fails_on_leftover_expectations() {
        let mock = MockApiClient::new();
        mock.expect(Endpoint::Login).return_empty(200);
        mock.verify();
    }
}
