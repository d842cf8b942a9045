use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::{TokenStore, TokenStoreError};
use crate::model::AuthToken;

#[derive(Serialize, Deserialize)]
struct StoredToken {
    token: AuthToken,
}

/// Persists the token as a small JSON file so a login survives restarts.
///
/// The file is read once at open; afterwards reads are served from memory.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    token: RwLock<Option<AuthToken>>,
}

impl FileTokenStore {
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, TokenStoreError> {
        let path = path.into();
        let token = match tokio::fs::read(&path).await {
            Ok(bytes) => Some(serde_json::from_slice::<StoredToken>(&bytes)?.token),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };
        debug!(path = %path.display(), logged_in = token.is_some(), "Token store opened");
        Ok(Self {
            path,
            token: RwLock::new(token),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn token(&self) -> Option<AuthToken> {
        self.token.read().await.clone()
    }

    async fn save(&self, token: AuthToken) -> Result<(), TokenStoreError> {
        let mut guard = self.token.write().await;
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec(&StoredToken {
            token: token.clone(),
        })?;
        tokio::fs::write(&self.path, bytes).await?;
        *guard = Some(token);
        Ok(())
    }

    async fn clear(&self) -> Result<(), TokenStoreError> {
        let mut guard = self.token.write().await;
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to remove token file");
                return Err(e.into());
            }
        }
        *guard = None;
        Ok(())
    }
}
