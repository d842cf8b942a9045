use std::sync::Arc;

use thiserror::Error;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::api::{ApiClient, ApiError, HttpApiClient};
use crate::cache::{CacheActor, SessionCache};
use crate::config::Config;
use crate::feed::{FeedClient, HttpFeedClient};
use crate::model::{NewsPage, Profile};
use crate::repository::{
    ApiAppRepository, ApiAuthRepository, ApiPostRepository, ApiProfileRepository,
    ApiSearchRepository, ApiSettingsRepository, FeedNewsRepository, ProfileKey,
};
use crate::state::{LoginHolder, RegisterHolder};
use crate::token::{FileTokenStore, MemoryTokenStore, TokenStore, TokenStoreError};
use crate::use_cases::{Repositories, UseCases};
use crate::validation::PasswordPolicy;

const CACHE_BUFFER: usize = 32;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Failed to build HTTP client: {0}")]
    Http(#[from] ApiError),

    #[error("Failed to open token store: {0}")]
    TokenStore(#[from] TokenStoreError),
}

/// Dependency container for the client core.
///
/// `AppContainer` is responsible for:
/// - **Wiring**: clients, token store, caches, repositories and use cases
/// - **Lifecycle**: spawning the cache actors and stopping them on shutdown
///
/// # Example
///
/// ```ignore
/// let app = AppContainer::new(Config::load()?).await?;
///
/// let mut news = app.use_cases.fetch_news.execute(1);
/// while let Some(state) = news.next().await {
///     // render state
/// }
///
/// app.shutdown().await?;
/// ```
pub struct AppContainer {
    pub use_cases: UseCases,
    pub tokens: Arc<dyn TokenStore>,
    pub config: Config,
    shutdown: CancellationToken,
    handles: Vec<JoinHandle<()>>,
}

impl AppContainer {
    /// Builds the HTTP clients from `config` and opens the token store: the
    /// configured file when set, memory otherwise.
    pub async fn new(config: Config) -> Result<Self, StartupError> {
        let api = Arc::new(HttpApiClient::from_config(&config.api)?);
        let feed = Arc::new(HttpFeedClient::from_config(&config.api, &config.feed)?);
        let tokens: Arc<dyn TokenStore> = match &config.storage.token_file {
            Some(path) => Arc::new(FileTokenStore::open(path.clone()).await?),
            None => Arc::new(MemoryTokenStore::new()),
        };
        Ok(Self::with_clients(config, api, feed, tokens))
    }

    /// Wires the container around externally built collaborators.
    /// Must be called inside a Tokio runtime.
    pub fn with_clients(
        config: Config,
        api: Arc<dyn ApiClient>,
        feed: Arc<dyn FeedClient>,
        tokens: Arc<dyn TokenStore>,
    ) -> Self {
        let shutdown = CancellationToken::new();

        let (profile_actor, profile_cache) =
            CacheActor::<ProfileKey, Profile>::new("profile", CACHE_BUFFER);
        let (news_actor, news_cache) = CacheActor::<u32, NewsPage>::new("news", CACHE_BUFFER);
        let handles = vec![
            tokio::spawn(profile_actor.run(shutdown.clone())),
            tokio::spawn(news_actor.run(shutdown.clone())),
        ];

        let session_caches: Vec<Arc<dyn SessionCache>> = vec![Arc::new(profile_cache.clone())];
        let repositories = Repositories {
            auth: Arc::new(
                ApiAuthRepository::new(api.clone(), tokens.clone())
                    .with_session_caches(session_caches),
            ),
            profile: Arc::new(ApiProfileRepository::new(
                api.clone(),
                tokens.clone(),
                profile_cache,
            )),
            news: Arc::new(FeedNewsRepository::new(
                feed,
                news_cache,
                config.feed.per_page,
            )),
            posts: Arc::new(ApiPostRepository::new(api.clone(), tokens.clone())),
            search: Arc::new(ApiSearchRepository::new(api.clone(), tokens.clone())),
            settings: Arc::new(ApiSettingsRepository::new(api.clone(), tokens.clone())),
            app: Arc::new(ApiAppRepository::new(api, config.api.platform.clone())),
        };

        info!("Container ready");
        Self {
            use_cases: UseCases::new(repositories),
            tokens,
            config,
            shutdown,
            handles,
        }
    }

    pub fn password_policy(&self) -> PasswordPolicy {
        PasswordPolicy::from(&self.config.validation)
    }

    pub fn login_holder(&self) -> LoginHolder {
        LoginHolder::new(self.use_cases.login.clone(), self.password_policy())
    }

    pub fn register_holder(&self) -> RegisterHolder {
        RegisterHolder::new(self.use_cases.register.clone(), self.password_policy())
    }

    /// Stops the cache actors and waits for them to exit.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if every actor stopped cleanly
    /// - `Err(String)` if an actor task panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down...");
        self.shutdown.cancel();
        drop(self.use_cases);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Cache actor failed: {:?}", e);
                return Err(format!("Cache actor failed: {:?}", e));
            }
        }

        info!("Shutdown complete.");
        Ok(())
    }
}
