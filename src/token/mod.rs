//! Authentication token holder.
//!
//! The token is process-wide state owned outside the pipeline. Components that
//! need it receive an `Arc<dyn TokenStore>` at construction; nothing reaches it
//! through a global.

pub mod file;
pub mod memory;

pub use file::*;
pub use memory::*;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::AuthToken;

#[derive(Debug, Error)]
pub enum TokenStoreError {
    #[error("Token storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Token storage is corrupted: {0}")]
    Serde(#[from] serde_json::Error),
}

#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn token(&self) -> Option<AuthToken>;

    async fn save(&self, token: AuthToken) -> Result<(), TokenStoreError>;

    async fn clear(&self) -> Result<(), TokenStoreError>;

    async fn is_logged_in(&self) -> bool {
        self.token().await.is_some()
    }
}
