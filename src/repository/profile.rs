use std::sync::Arc;

use futures::stream::{self, StreamExt};

use super::{read_cached, require_token, write_cached, ProfileRepository};
use crate::api::{ApiClient, ApiError};
use crate::cache::CacheClient;
use crate::framework::{cache_then_network, one_shot, ResourceStream};
use crate::model::{AuthToken, PhotoKind, PhotoUpload, Profile, ProfileUpdate, UploadedPhoto};
use crate::token::TokenStore;

/// Key under which profiles are cached.
///
/// # Session Scoping
/// The own profile is stored under the token it was fetched with. A response
/// that arrives after the session changed lands under the old token, which no
/// later read asks for, so one account never sees another account's record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProfileKey {
    /// The profile of the user signed in with this token.
    Own(AuthToken),
}

pub struct ApiProfileRepository {
    api: Arc<dyn ApiClient>,
    tokens: Arc<dyn TokenStore>,
    cache: CacheClient<ProfileKey, Profile>,
}

impl ApiProfileRepository {
    pub fn new(
        api: Arc<dyn ApiClient>,
        tokens: Arc<dyn TokenStore>,
        cache: CacheClient<ProfileKey, Profile>,
    ) -> Self {
        Self { api, tokens, cache }
    }
}

impl ProfileRepository for ApiProfileRepository {
    /// The token is read once; cache lookup, request and write-back all use it.
    fn fetch_profile(&self) -> ResourceStream<Profile> {
        let tokens = self.tokens.clone();
        let api = self.api.clone();
        let cache = self.cache.clone();

        stream::once(async move { tokens.token().await })
            .flat_map(move |token| match token {
                Some(token) => fetch_own_profile(api.clone(), cache.clone(), token),
                None => one_shot("fetch_profile", async { Err(ApiError::Unauthenticated) }),
            })
            .boxed()
    }

    fn update_profile(&self, update: ProfileUpdate) -> ResourceStream<Profile> {
        let api = self.api.clone();
        let tokens = self.tokens.clone();
        let cache = self.cache.clone();

        one_shot("update_profile", async move {
            let token = require_token(tokens.as_ref()).await?;
            let profile = api.update_profile(token.clone(), update).await?.into_result()?;
            write_cached(&cache, ProfileKey::Own(token), profile.clone()).await;
            Ok(profile)
        })
    }

    /// Uploads the image, then points the cached profile at the new URL.
    fn upload_photo(&self, photo: PhotoUpload) -> ResourceStream<UploadedPhoto> {
        let api = self.api.clone();
        let tokens = self.tokens.clone();
        let cache = self.cache.clone();

        one_shot("upload_photo", async move {
            let token = require_token(tokens.as_ref()).await?;
            let uploaded = api.upload_photo(token.clone(), photo).await?.into_result()?;

            let key = ProfileKey::Own(token);
            if let Some(profile) = read_cached(&cache, key.clone()).await {
                let url = Some(uploaded.url.clone());
                let profile = match uploaded.kind {
                    PhotoKind::Profile => Profile {
                        photo_url: url,
                        ..profile
                    },
                    PhotoKind::Cover => Profile {
                        cover_url: url,
                        ..profile
                    },
                };
                write_cached(&cache, key, profile).await;
            }
            Ok(uploaded)
        })
    }
}

fn fetch_own_profile(
    api: Arc<dyn ApiClient>,
    cache: CacheClient<ProfileKey, Profile>,
    token: AuthToken,
) -> ResourceStream<Profile> {
    let key = ProfileKey::Own(token.clone());
    let reader = cache.clone();
    let read_key = key.clone();

    cache_then_network(
        "fetch_profile",
        async move { read_cached(&reader, read_key).await },
        async move { api.get_profile(token).await?.into_result() },
        move |fresh| async move { write_cached(&cache, key, fresh).await },
    )
}
