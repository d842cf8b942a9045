use std::sync::Arc;

use tracing::info;

use super::{require_token, AuthRepository};
use crate::api::ApiClient;
use crate::cache::SessionCache;
use crate::framework::{one_shot, ResourceStream};
use crate::model::{LoginRequest, RegisterRequest, User};
use crate::token::TokenStore;

/// Signs users in and out against the REST API.
///
/// A successful login or registration persists the returned token and starts
/// the session with empty session caches; a logout acknowledged by the server
/// clears the token together with every session cache.
pub struct ApiAuthRepository {
    api: Arc<dyn ApiClient>,
    tokens: Arc<dyn TokenStore>,
    session_caches: Vec<Arc<dyn SessionCache>>,
}

impl ApiAuthRepository {
    pub fn new(api: Arc<dyn ApiClient>, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            api,
            tokens,
            session_caches: Vec::new(),
        }
    }

    /// Caches holding per-user data, emptied whenever the session changes.
    pub fn with_session_caches(mut self, caches: Vec<Arc<dyn SessionCache>>) -> Self {
        self.session_caches = caches;
        self
    }
}

impl AuthRepository for ApiAuthRepository {
    fn register(&self, request: RegisterRequest) -> ResourceStream<User> {
        let api = self.api.clone();
        let tokens = self.tokens.clone();
        let caches = self.session_caches.clone();
        one_shot("register", async move {
            let session = api.register(request).await?.into_result()?;
            tokens.save(session.token).await?;
            invalidate_all(&caches).await;
            info!(user_id = session.user.id, "Registered");
            Ok(session.user)
        })
    }

    fn login(&self, request: LoginRequest) -> ResourceStream<User> {
        let api = self.api.clone();
        let tokens = self.tokens.clone();
        let caches = self.session_caches.clone();
        one_shot("login", async move {
            let session = api.login(request).await?.into_result()?;
            tokens.save(session.token).await?;
            invalidate_all(&caches).await;
            info!(user_id = session.user.id, "Logged in");
            Ok(session.user)
        })
    }

    fn logout(&self) -> ResourceStream<()> {
        let api = self.api.clone();
        let tokens = self.tokens.clone();
        let caches = self.session_caches.clone();
        one_shot("logout", async move {
            let token = require_token(tokens.as_ref()).await?;
            api.logout(token).await?.into_ack()?;
            tokens.clear().await?;
            invalidate_all(&caches).await;
            info!("Logged out");
            Ok(())
        })
    }
}

async fn invalidate_all(caches: &[Arc<dyn SessionCache>]) {
    for cache in caches {
        cache.invalidate().await;
    }
}
