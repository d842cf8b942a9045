//! # Pipeline Builders
//!
//! Turns plain futures into ordered [`Resource`] streams.
//!
//! ## Shapes
//!
//! - [`one_shot`]: `Loading` → `Success | Error`. Used by login, updates, uploads.
//! - [`cache_then_network`]: `[Success(stale)]` → `Loading` → `Success | Error(stale)`.
//!   Used by profile and news reads.
//!
//! Streams are lazy: nothing runs until the consumer polls. Each call builds an
//! independent stream, so two identical calls perform two round trips.
//!
//! ## Cancellation
//!
//! Dropping a stream drops the in-flight future with it, which aborts the HTTP
//! request. [`ResourceStreamExt::with_cancellation`] ties that to a
//! [`CancellationToken`] owned by the consuming scope.

use std::future::Future;
use std::pin::Pin;

use futures::future::{self, BoxFuture, FutureExt};
use futures::stream::{self, Stream, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::Resource;
use crate::api::ApiError;

/// Lazy, single-subscriber sequence of envelope states for one invocation.
pub type ResourceStream<T> = Pin<Box<dyn Stream<Item = Resource<T>> + Send + 'static>>;

type WriteBack<T> = Box<dyn FnOnce(T) -> BoxFuture<'static, ()> + Send>;

struct Fetch<T> {
    network: BoxFuture<'static, Result<T, ApiError>>,
    write_back: WriteBack<T>,
}

enum Stage<T> {
    ReadCache {
        cached: BoxFuture<'static, Option<T>>,
        fetch: Fetch<T>,
    },
    Announce {
        stale: T,
        fetch: Fetch<T>,
    },
    Fetch {
        stale: Option<T>,
        fetch: Fetch<T>,
    },
    Done,
}

/// Wraps a single request: emits `Loading`, then exactly one terminal state.
pub fn one_shot<T, F>(operation: &'static str, request: F) -> ResourceStream<T>
where
    T: Send + 'static,
    F: Future<Output = Result<T, ApiError>> + Send + 'static,
{
    let terminal = async move {
        match request.await {
            Ok(data) => {
                debug!(operation, "Success");
                Resource::success(data)
            }
            Err(error) => {
                warn!(operation, %error, "Failed");
                Resource::error(error.to_string(), None)
            }
        }
    };

    stream::once(future::ready(Resource::Loading))
        .inspect(move |_| debug!(operation, "Loading"))
        .chain(stream::once(terminal))
        .boxed()
}

/// Reads the local cache, then the network.
///
/// A cache hit is surfaced immediately as `Success`. A network success is
/// written back through `write_back` before it is emitted; a network failure
/// carries the cached value (if any) alongside the message.
///
/// # Architecture Note
/// The stream is a small state machine driven by [`stream::unfold`]:
///
/// | Stage       | Emits             | Next                        |
/// |-------------|-------------------|-----------------------------|
/// | `ReadCache` | `Success(stale)`  | `Announce`                  |
/// | `ReadCache` | `Loading` (miss)  | `Fetch` without stale value |
/// | `Announce`  | `Loading`         | `Fetch` with stale value    |
/// | `Fetch`     | terminal state    | `Done`                      |
///
/// Each stage runs only when the consumer polls for the next item. Dropping
/// the stream between stages therefore skips the network call entirely, and
/// dropping it during `Fetch` drops the request before `write_back` runs.
///
/// The caller decides which cache slot `cached` and `write_back` touch. Both
/// futures are built before the stream starts, so a slot chosen from the
/// current session stays fixed for the whole invocation.
pub fn cache_then_network<T, C, N, W, WF>(
    operation: &'static str,
    cached: C,
    network: N,
    write_back: W,
) -> ResourceStream<T>
where
    T: Clone + Send + 'static,
    C: Future<Output = Option<T>> + Send + 'static,
    N: Future<Output = Result<T, ApiError>> + Send + 'static,
    W: FnOnce(T) -> WF + Send + 'static,
    WF: Future<Output = ()> + Send + 'static,
{
    let fetch = Fetch {
        network: network.boxed(),
        write_back: Box::new(move |data| write_back(data).boxed()),
    };
    let initial = Stage::ReadCache {
        cached: cached.boxed(),
        fetch,
    };

    stream::unfold(initial, move |stage| async move {
        match stage {
            Stage::ReadCache { cached, fetch } => match cached.await {
                Some(stale) => {
                    debug!(operation, "Cache hit");
                    Some((
                        Resource::success(stale.clone()),
                        Stage::Announce { stale, fetch },
                    ))
                }
                None => {
                    debug!(operation, "Cache miss");
                    Some((Resource::Loading, Stage::Fetch { stale: None, fetch }))
                }
            },
            Stage::Announce { stale, fetch } => Some((
                Resource::Loading,
                Stage::Fetch {
                    stale: Some(stale),
                    fetch,
                },
            )),
            Stage::Fetch { stale, fetch } => {
                let Fetch {
                    network,
                    write_back,
                } = fetch;
                let resource = match network.await {
                    Ok(data) => {
                        write_back(data.clone()).await;
                        debug!(operation, "Success");
                        Resource::success(data)
                    }
                    Err(error) => {
                        let has_stale = stale.is_some();
                        warn!(operation, %error, has_stale, "Failed");
                        Resource::error(error.to_string(), stale)
                    }
                };
                Some((resource, Stage::Done))
            }
            Stage::Done => None,
        }
    })
    .boxed()
}

/// Scope-bound consumption of a [`ResourceStream`].
pub trait ResourceStreamExt<T> {
    /// Ends the stream as soon as `cancel` fires. The pending request is never
    /// polled again and is dropped together with the stream.
    fn with_cancellation(self, cancel: CancellationToken) -> ResourceStream<T>;
}

impl<T: Send + 'static> ResourceStreamExt<T> for ResourceStream<T> {
    fn with_cancellation(self, cancel: CancellationToken) -> ResourceStream<T> {
        self.take_until(cancel.cancelled_owned()).boxed()
    }
}
