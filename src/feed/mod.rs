//! Read-only content feed (news articles published through the CMS).

pub mod http;
pub mod mock;

pub use http::*;

use async_trait::async_trait;

use crate::api::ApiError;
use crate::model::NewsPage;

/// Paginated article listing. Pages are 1-based.
#[async_trait]
pub trait FeedClient: Send + Sync {
    async fn articles(&self, page: u32, per_page: u32) -> Result<NewsPage, ApiError>;
}
