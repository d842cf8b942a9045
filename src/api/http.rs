//! `reqwest` implementation of [`ApiClient`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, ClientBuilder, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument};
use url::Url;

use super::endpoints::*;
use super::{ApiClient, ApiError, ApiResponse, ApiResult, ErrorBody};
use crate::config::ApiConfig;
use crate::model::{
    AppVersion, AuthToken, LoginRequest, Member, NewPost, PhotoUpload, Post, Profile,
    ProfileUpdate, RegisterRequest, SearchQuery, Session, Settings, UploadedPhoto,
};

// HttpApiClient is a wrapper around a reqwest client.
// It exposes a single function for each API endpoint.
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    client: Client,
    base_url: Url,
}

impl HttpApiClient {
    /// Creates the underlying HTTP client with the configured timeouts.
    pub fn new_http_client(config: &ApiConfig) -> reqwest::Result<Client> {
        ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Self::new_http_client(config)?;
        Self::initialize(client, &config.base_url)
    }

    /// Creates a client rooted at `base_url`. Endpoint paths are resolved
    /// relative to it, so `https://host/v2` serves `https://host/v2/api/login`.
    pub fn initialize(client: Client, base_url: &str) -> Result<Self, ApiError> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        info!(%base_url, "API client initialized");
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path)?)
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        Ok(self.client.request(method, self.endpoint(path)?))
    }

    fn authed(&self, method: Method, path: &str, token: &AuthToken) -> Result<RequestBuilder, ApiError> {
        Ok(self.request(method, path)?.bearer_auth(token.as_str()))
    }

    /// Sends the request and decodes a JSON body on success. A non-2xx status
    /// is not an `Err` here: it comes back as an [`ApiResponse`] with the
    /// optional error payload.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        debug!(status, len = bytes.len(), "Response received");

        if !(200..300).contains(&status) {
            return Ok(ApiResponse::failure(status, parse_error_body(&bytes)));
        }
        let body = if is_blank(&bytes) {
            None
        } else {
            Some(serde_json::from_slice(&bytes)?)
        };
        Ok(ApiResponse {
            status,
            body,
            error: None,
        })
    }

    /// Like [`send`](Self::send) for endpoints whose success body is irrelevant.
    async fn send_ack(&self, request: RequestBuilder) -> ApiResult<()> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        debug!(status, "Response received");

        if (200..300).contains(&status) {
            Ok(ApiResponse::empty(status))
        } else {
            Ok(ApiResponse::failure(status, parse_error_body(&bytes)))
        }
    }
}

fn is_blank(bytes: &[u8]) -> bool {
    bytes.iter().all(u8::is_ascii_whitespace)
}

// Error payloads are best effort: proxies answer with HTML.
fn parse_error_body(bytes: &[u8]) -> Option<ErrorBody> {
    serde_json::from_slice(bytes).ok()
}

#[async_trait]
impl ApiClient for HttpApiClient {
    #[instrument(skip(self, request), fields(username = %request.username))]
    async fn register(&self, request: RegisterRequest) -> ApiResult<Session> {
        self.send(self.request(Method::POST, ENDPOINT_REGISTER)?.json(&request))
            .await
    }

    #[instrument(skip(self, request), fields(email = %request.email))]
    async fn login(&self, request: LoginRequest) -> ApiResult<Session> {
        self.send(self.request(Method::POST, ENDPOINT_LOGIN)?.json(&request))
            .await
    }

    #[instrument(skip_all)]
    async fn logout(&self, token: AuthToken) -> ApiResult<()> {
        self.send_ack(self.authed(Method::POST, ENDPOINT_LOGOUT, &token)?)
            .await
    }

    #[instrument(skip_all)]
    async fn get_profile(&self, token: AuthToken) -> ApiResult<Profile> {
        self.send(self.authed(Method::GET, ENDPOINT_PROFILE, &token)?)
            .await
    }

    #[instrument(skip(self, token))]
    async fn update_profile(&self, token: AuthToken, update: ProfileUpdate) -> ApiResult<Profile> {
        self.send(self.authed(Method::PUT, ENDPOINT_PROFILE, &token)?.json(&update))
            .await
    }

    #[instrument(skip(self, token))]
    async fn upload_photo(&self, token: AuthToken, photo: PhotoUpload) -> ApiResult<UploadedPhoto> {
        let part = Part::bytes(photo.bytes)
            .file_name(photo.file_name)
            .mime_str(&photo.content_type)?;
        let form = Form::new()
            .text("kind", photo.kind.as_str())
            .part("photo", part);
        self.send(
            self.authed(Method::POST, ENDPOINT_PROFILE_PHOTO, &token)?
                .multipart(form),
        )
        .await
    }

    #[instrument(skip(self, token))]
    async fn search_members(&self, token: AuthToken, query: SearchQuery) -> ApiResult<Vec<Member>> {
        let page = query.page.to_string();
        self.send(
            self.authed(Method::GET, ENDPOINT_MEMBER_SEARCH, &token)?
                .query(&[("q", query.term.as_str()), ("page", page.as_str())]),
        )
        .await
    }

    #[instrument(skip_all)]
    async fn get_settings(&self, token: AuthToken) -> ApiResult<Settings> {
        self.send(self.authed(Method::GET, ENDPOINT_SETTINGS, &token)?)
            .await
    }

    #[instrument(skip(self, token))]
    async fn update_settings(&self, token: AuthToken, settings: Settings) -> ApiResult<Settings> {
        self.send(self.authed(Method::PUT, ENDPOINT_SETTINGS, &token)?.json(&settings))
            .await
    }

    #[instrument(skip(self, token))]
    async fn create_post(&self, token: AuthToken, post: NewPost) -> ApiResult<Post> {
        self.send(self.authed(Method::POST, ENDPOINT_POSTS, &token)?.json(&post))
            .await
    }

    #[instrument(skip(self, token))]
    async fn list_posts(&self, token: AuthToken, page: u32) -> ApiResult<Vec<Post>> {
        self.send(
            self.authed(Method::GET, ENDPOINT_POSTS, &token)?
                .query(&[("page", page)]),
        )
        .await
    }

    #[instrument(skip(self))]
    async fn check_app_version(&self, platform: String) -> ApiResult<AppVersion> {
        self.send(
            self.request(Method::GET, ENDPOINT_APP_VERSION)?
                .query(&[("platform", platform.as_str())]),
        )
        .await
    }
}
