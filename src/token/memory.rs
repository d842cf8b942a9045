use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{TokenStore, TokenStoreError};
use crate::model::AuthToken;

/// Keeps the token for the lifetime of the process only.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<AuthToken>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: AuthToken) -> Self {
        Self {
            token: RwLock::new(Some(token)),
        }
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn token(&self) -> Option<AuthToken> {
        self.token.read().await.clone()
    }

    async fn save(&self, token: AuthToken) -> Result<(), TokenStoreError> {
        *self.token.write().await = Some(token);
        Ok(())
    }

    async fn clear(&self) -> Result<(), TokenStoreError> {
        *self.token.write().await = None;
        Ok(())
    }
}
