//! # Cache Actor
//!
//! ## Key Types
//!
//! - [`CacheActor`]: owns the map and processes requests sequentially.
//! - [`CacheClient`]: the handle repositories hold.
//! - [`CacheError`]: the actor is gone or dropped the reply.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors that can occur talking to the cache actor.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum CacheError {
    #[error("Cache actor closed")]
    ActorClosed,
    #[error("Cache actor dropped response channel")]
    ActorDropped,
}

/// Type alias for the one-shot response channel used by the actor.
pub type Response<T> = oneshot::Sender<T>;

/// Message sent to the actor.
#[derive(Debug)]
pub enum CacheRequest<K, V> {
    Get { key: K, respond_to: Response<Option<V>> },
    Put { key: K, value: V, respond_to: Response<()> },
    Remove { key: K, respond_to: Response<Option<V>> },
    Clear { respond_to: Response<()> },
}

/// Owns a key/value map. Values are cloned out on `Get`, so cached records
/// are never shared mutably.
///
/// # Architecture Note
/// This is the "Server" half of the cache; [`CacheClient`] is the handle
/// repositories hold. Requests are processed one at a time in [`run`](Self::run),
/// so the map needs no lock: a `Put` followed by a `Get` from the same client
/// always observes the write.
///
/// **Lifetime**:
/// The loop ends when the shutdown token fires or the last client is dropped.
/// Requests sent afterwards fail with [`CacheError::ActorClosed`], which
/// repositories treat as a cache miss.
pub struct CacheActor<K, V> {
    name: &'static str,
    receiver: mpsc::Receiver<CacheRequest<K, V>>,
    store: HashMap<K, V>,
}

impl<K, V> CacheActor<K, V>
where
    K: Eq + Hash + Debug + Send + 'static,
    V: Clone + Send + 'static,
{
    pub fn new(name: &'static str, buffer_size: usize) -> (Self, CacheClient<K, V>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            name,
            receiver,
            store: HashMap::new(),
        };
        (actor, CacheClient::new(sender))
    }

    /// Runs the request loop until every client is dropped or `shutdown` fires.
    pub async fn run(mut self, shutdown: CancellationToken) {
        let cache = self.name;
        info!(cache, "Cache started");

        loop {
            let msg = tokio::select! {
                msg = self.receiver.recv() => msg,
                _ = shutdown.cancelled() => None,
            };
            let Some(msg) = msg else { break };

            match msg {
                CacheRequest::Get { key, respond_to } => {
                    let value = self.store.get(&key).cloned();
                    debug!(cache, ?key, hit = value.is_some(), "Get");
                    let _ = respond_to.send(value);
                }
                CacheRequest::Put {
                    key,
                    value,
                    respond_to,
                } => {
                    debug!(cache, ?key, "Put");
                    self.store.insert(key, value);
                    let _ = respond_to.send(());
                }
                CacheRequest::Remove { key, respond_to } => {
                    debug!(cache, ?key, "Remove");
                    let _ = respond_to.send(self.store.remove(&key));
                }
                CacheRequest::Clear { respond_to } => {
                    debug!(cache, size = self.store.len(), "Clear");
                    self.store.clear();
                    let _ = respond_to.send(());
                }
            }
        }

        info!(cache, size = self.store.len(), "Shutdown");
    }
}

/// Handle for a running [`CacheActor`].
pub struct CacheClient<K, V> {
    sender: mpsc::Sender<CacheRequest<K, V>>,
}

impl<K, V> Clone for CacheClient<K, V> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<K, V> CacheClient<K, V> {
    pub fn new(sender: mpsc::Sender<CacheRequest<K, V>>) -> Self {
        Self { sender }
    }

    pub async fn get(&self, key: K) -> Result<Option<V>, CacheError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(CacheRequest::Get { key, respond_to })
            .await
            .map_err(|_| CacheError::ActorClosed)?;
        response.await.map_err(|_| CacheError::ActorDropped)
    }

    pub async fn put(&self, key: K, value: V) -> Result<(), CacheError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(CacheRequest::Put {
                key,
                value,
                respond_to,
            })
            .await
            .map_err(|_| CacheError::ActorClosed)?;
        response.await.map_err(|_| CacheError::ActorDropped)
    }

    pub async fn remove(&self, key: K) -> Result<Option<V>, CacheError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(CacheRequest::Remove { key, respond_to })
            .await
            .map_err(|_| CacheError::ActorClosed)?;
        response.await.map_err(|_| CacheError::ActorDropped)
    }

    pub async fn clear(&self) -> Result<(), CacheError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(CacheRequest::Clear { respond_to })
            .await
            .map_err(|_| CacheError::ActorClosed)?;
        response.await.map_err(|_| CacheError::ActorDropped)
    }
}

/// A cache holding data of the signed-in user; emptied on logout.
#[async_trait]
pub trait SessionCache: Send + Sync {
    async fn invalidate(&self);
}

#[async_trait]
impl<K: Send + 'static, V: Send + 'static> SessionCache for CacheClient<K, V> {
    async fn invalidate(&self) {
        if let Err(error) = self.clear().await {
            warn!(%error, "Cache invalidation failed");
        }
    }
}
