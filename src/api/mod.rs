//! Client side of the REST API.
//!
//! [`ApiClient`] is the seam between repositories and the network. Every method
//! returns the raw [`ApiResponse`] (status, optional body, optional error payload);
//! [`ApiResponse::into_result`] normalizes it into `Result<T, ApiError>`.
//!
//! - [`HttpApiClient`] talks to the real server over `reqwest`.
//! - [`mock::MockApiClient`] replays scripted responses in tests.

pub mod endpoints;
pub mod error;
pub mod http;
pub mod mock;

pub use error::*;
pub use http::*;

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::{
    AppVersion, AuthToken, LoginRequest, Member, NewPost, PhotoUpload, Post, Profile,
    ProfileUpdate, RegisterRequest, SearchQuery, Session, Settings, UploadedPhoto,
};

/// Error payload the server attaches to non-2xx responses.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    /// Field name → validation messages.
    #[serde(default)]
    pub errors: BTreeMap<String, Vec<String>>,
}

impl ErrorBody {
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            errors: BTreeMap::new(),
        }
    }

    /// The top-level message, or the first field error when there is none.
    pub fn summary(&self) -> Option<String> {
        self.message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .or_else(|| {
                self.errors
                    .values()
                    .flatten()
                    .find(|m| !m.trim().is_empty())
                    .cloned()
            })
    }
}

/// What came back from one request.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub body: Option<T>,
    pub error: Option<ErrorBody>,
}

pub type ApiResult<T> = Result<ApiResponse<T>, ApiError>;

impl<T> ApiResponse<T> {
    pub fn ok(body: T) -> Self {
        Self {
            status: 200,
            body: Some(body),
            error: None,
        }
    }

    pub fn empty(status: u16) -> Self {
        Self {
            status,
            body: None,
            error: None,
        }
    }

    pub fn failure(status: u16, error: Option<ErrorBody>) -> Self {
        Self {
            status,
            body: None,
            error,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// 2xx with a body is `Ok`; 2xx without one is a decode failure; anything
    /// else is a server error carrying the payload message.
    pub fn into_result(self) -> Result<T, ApiError> {
        if !self.is_success() {
            return Err(self.server_error());
        }
        self.body.ok_or_else(|| ApiError::Decode("empty response body".to_string()))
    }

    /// Like [`into_result`](Self::into_result) but ignores the body.
    pub fn into_ack(self) -> Result<(), ApiError> {
        if self.is_success() {
            Ok(())
        } else {
            Err(self.server_error())
        }
    }

    fn server_error(&self) -> ApiError {
        ApiError::server(self.status, self.error.as_ref())
    }
}

/// Request/response methods of the REST API, one per operation.
///
/// Authenticated calls take the bearer token explicitly; the caller reads it
/// from the [`TokenStore`](crate::token::TokenStore).
#[async_trait]
pub trait ApiClient: Send + Sync {
    async fn register(&self, request: RegisterRequest) -> ApiResult<Session>;

    async fn login(&self, request: LoginRequest) -> ApiResult<Session>;

    async fn logout(&self, token: AuthToken) -> ApiResult<()>;

    async fn get_profile(&self, token: AuthToken) -> ApiResult<Profile>;

    async fn update_profile(&self, token: AuthToken, update: ProfileUpdate) -> ApiResult<Profile>;

    async fn upload_photo(&self, token: AuthToken, photo: PhotoUpload) -> ApiResult<UploadedPhoto>;

    async fn search_members(&self, token: AuthToken, query: SearchQuery) -> ApiResult<Vec<Member>>;

    async fn get_settings(&self, token: AuthToken) -> ApiResult<Settings>;

    async fn update_settings(&self, token: AuthToken, settings: Settings) -> ApiResult<Settings>;

    async fn create_post(&self, token: AuthToken, post: NewPost) -> ApiResult<Post>;

    async fn list_posts(&self, token: AuthToken, page: u32) -> ApiResult<Vec<Post>>;

    async fn check_app_version(&self, platform: String) -> ApiResult<AppVersion>;
}
