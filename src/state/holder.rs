//! # State Holder Core
//!
//! Owns the UI-facing state of one screen and the background work feeding it.
//!
//! - The current state lives in a `watch` channel; [`StateHolder::subscribe`]
//!   hands out a stream that starts with the current value.
//! - [`StateHolder::launch`] consumes a [`ResourceStream`] on a spawned task and
//!   folds every envelope into the state, in emission order.
//! - Work is scoped to the holder: launching again cancels the previous job, and
//!   closing or dropping the holder cancels everything still in flight.

use std::sync::{Arc, Mutex, PoisonError};

use futures::StreamExt;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::WatchStream;
use tokio_util::sync::CancellationToken;
use tracing::trace;

use crate::framework::{Resource, ResourceStream, ResourceStreamExt};

/// State of one screen plus the jobs that feed it.
///
/// # Architecture Note
/// The holder is the single writer of its state. Subscribers get their own
/// [`WatchStream`] and only ever read clones, so two screens never share a
/// mutable record.
///
/// **Job scoping**:
/// The holder owns a root [`CancellationToken`]. Every [`launch`](Self::launch)
/// takes a child of it and cancels the child of the previous launch, so only
/// the most recent job may write. The job checks its token before applying
/// each envelope, which keeps a late emission from an abandoned request out of
/// the state. Dropping the holder cancels the root and with it every child.
pub struct StateHolder<S> {
    state_tx: Arc<watch::Sender<S>>,
    cancel: CancellationToken,
    job: Mutex<Option<CancellationToken>>,
}

impl<S> Drop for StateHolder<S> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl<S> StateHolder<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new(initial: S) -> Self {
        let (state_tx, _) = watch::channel(initial);
        Self {
            state_tx: Arc::new(state_tx),
            cancel: CancellationToken::new(),
            job: Mutex::new(None),
        }
    }

    pub fn state(&self) -> S {
        self.state_tx.borrow().clone()
    }

    /// Current state followed by every later change.
    pub fn subscribe(&self) -> WatchStream<S> {
        WatchStream::new(self.state_tx.subscribe())
    }

    /// Synchronous state change, e.g. field errors after validation.
    pub fn update(&self, modify: impl FnOnce(&mut S)) {
        self.state_tx.send_modify(modify);
    }

    /// Runs `stream` in the background, applying `reduce` to each envelope.
    ///
    /// Any job started by an earlier `launch` is cancelled first; its remaining
    /// emissions are never applied.
    pub fn launch<T, F>(&self, stream: ResourceStream<T>, reduce: F) -> JoinHandle<()>
    where
        T: Send + 'static,
        F: Fn(&mut S, Resource<T>) + Send + 'static,
    {
        let job = self.cancel.child_token();
        let previous = self
            .job
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(job.clone());
        if let Some(previous) = previous {
            previous.cancel();
        }

        let state_tx = self.state_tx.clone();
        tokio::spawn(async move {
            let mut stream = stream.with_cancellation(job.clone());
            while let Some(resource) = stream.next().await {
                if job.is_cancelled() {
                    break;
                }
                state_tx.send_modify(|state| reduce(state, resource));
            }
            trace!(cancelled = job.is_cancelled(), "Job finished");
        })
    }

    pub fn close(&self) {
        self.cancel.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// Holder for screens that show a single resource, such as the profile or a
/// news page.
pub struct ResourceHolder<T> {
    core: StateHolder<Option<Resource<T>>>,
}

impl<T> ResourceHolder<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            core: StateHolder::new(None),
        }
    }

    /// `None` until the first envelope arrives.
    pub fn state(&self) -> Option<Resource<T>> {
        self.core.state()
    }

    pub fn subscribe(&self) -> WatchStream<Option<Resource<T>>> {
        self.core.subscribe()
    }

    pub fn load(&self, stream: ResourceStream<T>) -> JoinHandle<()> {
        self.core.launch(stream, |state, resource| *state = Some(resource))
    }

    pub fn close(&self) {
        self.core.close();
    }
}

impl<T> Default for ResourceHolder<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use futures::stream;
    use tokio::sync::Notify;

    use super::*;
    use crate::api::ApiError;
    use crate::framework::one_shot;

    fn gated(gate: Arc<Notify>, value: u32, completed: Arc<AtomicUsize>) -> ResourceStream<u32> {
        one_shot("test", async move {
            gate.notified().await;
            completed.fetch_add(1, Ordering::SeqCst);
            Ok::<_, ApiError>(value)
        })
    }

    #[tokio::test]
    async fn envelopes_are_applied_in_order() {
        let holder = StateHolder::new(Vec::<Resource<u32>>::new());
        let stream: ResourceStream<u32> = stream::iter(vec![
            Resource::success(1),
            Resource::Loading,
            Resource::success(2),
        ])
        .boxed();

        holder
            .launch(stream, |log, resource| log.push(resource))
            .await
            .unwrap();

        assert_eq!(
            holder.state(),
            vec![Resource::success(1), Resource::Loading, Resource::success(2)]
        );
    }

    #[tokio::test]
    async fn subscribers_see_current_state_first() {
        let holder = ResourceHolder::<u32>::new();
        holder
            .load(one_shot("test", async { Ok::<_, ApiError>(5) }))
            .await
            .unwrap();

        let mut states = holder.subscribe();
        assert_eq!(states.next().await, Some(Some(Resource::success(5))));
    }

    #[tokio::test]
    async fn relaunch_cancels_the_previous_job() {
        let holder = ResourceHolder::<u32>::new();
        let completed = Arc::new(AtomicUsize::new(0));
        let slow_gate = Arc::new(Notify::new());

        let first = holder.load(gated(slow_gate.clone(), 1, completed.clone()));
        let second = holder.load(one_shot("test", async { Ok::<_, ApiError>(2) }));

        second.await.unwrap();
        slow_gate.notify_one();
        first.await.unwrap();

        assert_eq!(holder.state(), Some(Resource::success(2)));
        assert_eq!(completed.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn dropping_the_holder_abandons_in_flight_work() {
        let completed = Arc::new(AtomicUsize::new(0));
        let gate = Arc::new(Notify::new());
        let holder = ResourceHolder::<u32>::new();
        let mut states = holder.subscribe();

        let job = holder.load(gated(gate.clone(), 1, completed.clone()));
        assert_eq!(states.next().await, Some(None));
        assert_eq!(states.next().await, Some(Some(Resource::Loading)));

        drop(holder);
        gate.notify_one();
        tokio::time::timeout(Duration::from_secs(1), job)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(completed.load(Ordering::SeqCst), 0);
        assert_eq!(states.next().await, None);
    }

    #[tokio::test]
    async fn close_marks_the_holder_closed() {
        let holder = StateHolder::new(0u8);
        assert!(!holder.is_closed());
        holder.close();
        assert!(holder.is_closed());
    }
}
