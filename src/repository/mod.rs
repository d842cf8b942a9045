//! # Repositories
//!
//! One trait per feature area. Every method returns a [`ResourceStream`] built
//! with [`one_shot`](crate::framework::one_shot) or
//! [`cache_then_network`](crate::framework::cache_then_network), so callers see
//! the same `Loading` / `Success` / `Error` sequence whatever the operation.
//!
//! The `Api*` implementations take their collaborators at construction:
//! an `Arc<dyn ApiClient>`, an `Arc<dyn TokenStore>` and, for cached reads, a
//! [`CacheClient`]. Authenticated calls read the token first and fail with
//! `"Not logged in"` before touching the network when none is stored.

pub mod app;
pub mod auth;
pub mod news;
pub mod posts;
pub mod profile;
pub mod search;
pub mod settings;

pub use app::*;
pub use auth::*;
pub use news::*;
pub use posts::*;
pub use profile::*;
pub use search::*;
pub use settings::*;

use std::fmt::Debug;

use tracing::warn;

use crate::api::ApiError;
use crate::cache::CacheClient;
use crate::framework::ResourceStream;
use crate::model::{
    AuthToken, LoginRequest, Member, NewPost, NewsPage, PhotoUpload, Post, Profile, ProfileUpdate,
    RegisterRequest, SearchQuery, Settings, UploadedPhoto, User, VersionStatus,
};
use crate::token::TokenStore;

pub trait AuthRepository: Send + Sync {
    fn register(&self, request: RegisterRequest) -> ResourceStream<User>;
    fn login(&self, request: LoginRequest) -> ResourceStream<User>;
    fn logout(&self) -> ResourceStream<()>;
}

pub trait ProfileRepository: Send + Sync {
    /// Cached profile first (if any), then the server copy.
    fn fetch_profile(&self) -> ResourceStream<Profile>;
    fn update_profile(&self, update: ProfileUpdate) -> ResourceStream<Profile>;
    fn upload_photo(&self, photo: PhotoUpload) -> ResourceStream<UploadedPhoto>;
}

pub trait NewsRepository: Send + Sync {
    fn fetch_news(&self, page: u32) -> ResourceStream<NewsPage>;
}

pub trait PostRepository: Send + Sync {
    fn create_post(&self, post: NewPost) -> ResourceStream<Post>;
    fn list_posts(&self, page: u32) -> ResourceStream<Vec<Post>>;
}

pub trait SearchRepository: Send + Sync {
    fn search_members(&self, query: SearchQuery) -> ResourceStream<Vec<Member>>;
}

pub trait SettingsRepository: Send + Sync {
    fn get_settings(&self) -> ResourceStream<Settings>;
    fn update_settings(&self, settings: Settings) -> ResourceStream<Settings>;
}

pub trait AppRepository: Send + Sync {
    /// Compares `current` against the release published for the configured platform.
    fn check_app_version(&self, current: String) -> ResourceStream<VersionStatus>;
}

pub(crate) async fn require_token(tokens: &dyn TokenStore) -> Result<AuthToken, ApiError> {
    tokens.token().await.ok_or(ApiError::Unauthenticated)
}

/// Cache lookup where an unreachable cache counts as a miss.
pub(crate) async fn read_cached<K, V>(cache: &CacheClient<K, V>, key: K) -> Option<V>
where
    K: Debug,
{
    let label = format!("{key:?}");
    match cache.get(key).await {
        Ok(value) => value,
        Err(error) => {
            warn!(key = %label, %error, "Cache read failed");
            None
        }
    }
}

pub(crate) async fn write_cached<K, V>(cache: &CacheClient<K, V>, key: K, value: V)
where
    K: Debug,
{
    let label = format!("{key:?}");
    if let Err(error) = cache.put(key, value).await {
        warn!(key = %label, %error, "Cache write failed");
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use futures::StreamExt;

    use crate::framework::{Resource, ResourceStream};
    use crate::model::AuthToken;
    use crate::token::{MemoryTokenStore, TokenStore};

    pub fn signed_in() -> Arc<dyn TokenStore> {
        Arc::new(MemoryTokenStore::with_token(AuthToken::new("secret-token")))
    }

    pub fn signed_out() -> Arc<dyn TokenStore> {
        Arc::new(MemoryTokenStore::new())
    }

    pub async fn collect<T>(stream: ResourceStream<T>) -> Vec<Resource<T>> {
        stream.collect().await
    }
}
