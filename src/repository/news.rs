use std::sync::Arc;

use super::{read_cached, write_cached, NewsRepository};
use crate::cache::CacheClient;
use crate::feed::FeedClient;
use crate::framework::{cache_then_network, ResourceStream};
use crate::model::NewsPage;

/// News pages from the CMS feed, cached per page number.
///
/// The feed is public, so no token is read.
pub struct FeedNewsRepository {
    feed: Arc<dyn FeedClient>,
    cache: CacheClient<u32, NewsPage>,
    per_page: u32,
}

impl FeedNewsRepository {
    pub fn new(feed: Arc<dyn FeedClient>, cache: CacheClient<u32, NewsPage>, per_page: u32) -> Self {
        Self {
            feed,
            cache,
            per_page,
        }
    }
}

impl NewsRepository for FeedNewsRepository {
    fn fetch_news(&self, page: u32) -> ResourceStream<NewsPage> {
        let page = page.max(1);
        let feed = self.feed.clone();
        let per_page = self.per_page;
        let reader = self.cache.clone();
        let writer = self.cache.clone();

        cache_then_network(
            "fetch_news",
            async move { read_cached(&reader, page).await },
            async move { feed.articles(page, per_page).await },
            move |fresh| async move { write_cached(&writer, page, fresh).await },
        )
    }
}
