//! Scripted [`FeedClient`] for tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::FeedClient;
use crate::api::ApiError;
use crate::model::NewsPage;

/// Replays queued results in order and counts requests.
#[derive(Default)]
pub struct MockFeedClient {
    responses: Mutex<VecDeque<Result<NewsPage, ApiError>>>,
    calls: AtomicUsize,
}

impl MockFeedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, response: Result<NewsPage, ApiError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FeedClient for MockFeedClient {
    async fn articles(&self, page: u32, _per_page: u32) -> Result<NewsPage, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(response) => response,
            None => panic!("Unexpected feed request for page {page}"),
        }
    }
}
