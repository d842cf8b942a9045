//! WordPress REST implementation of [`FeedClient`].

use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

use super::FeedClient;
use crate::api::{ApiError, ErrorBody, HttpApiClient};
use crate::config::{ApiConfig, FeedConfig};
use crate::model::{News, NewsPage};

const POSTS_PATH: &str = "wp-json/wp/v2/posts";
const TOTAL_PAGES_HEADER: &str = "x-wp-totalpages";
const INVALID_PAGE_CODE: &str = "rest_post_invalid_page_number";

#[derive(Debug, Deserialize)]
struct WpPost {
    id: u64,
    date_gmt: NaiveDateTime,
    title: Rendered,
    content: Rendered,
    #[serde(default, rename = "_embedded")]
    embedded: Option<WpEmbedded>,
}

#[derive(Debug, Deserialize)]
struct Rendered {
    rendered: String,
}

#[derive(Debug, Deserialize)]
struct WpEmbedded {
    #[serde(default, rename = "wp:featuredmedia")]
    featured_media: Vec<WpMedia>,
}

#[derive(Debug, Deserialize)]
struct WpMedia {
    #[serde(default)]
    source_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WpError {
    code: String,
}

impl From<WpPost> for News {
    fn from(post: WpPost) -> Self {
        let media_url = post
            .embedded
            .and_then(|e| e.featured_media.into_iter().find_map(|m| m.source_url));
        News {
            id: post.id,
            title: post.title.rendered,
            content: post.content.rendered,
            media_url,
            published_at: post.date_gmt.and_utc(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpFeedClient {
    client: Client,
    base_url: Url,
}

impl HttpFeedClient {
    pub fn from_config(api: &ApiConfig, feed: &FeedConfig) -> Result<Self, ApiError> {
        let client = HttpApiClient::new_http_client(api)?;
        Self::initialize(client, &feed.base_url)
    }

    pub fn initialize(client: Client, base_url: &str) -> Result<Self, ApiError> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { client, base_url })
    }
}

#[async_trait]
impl FeedClient for HttpFeedClient {
    #[instrument(skip(self))]
    async fn articles(&self, page: u32, per_page: u32) -> Result<NewsPage, ApiError> {
        let url = self.base_url.join(POSTS_PATH)?;
        let response = self
            .client
            .get(url)
            .query(&[("page", page), ("per_page", per_page)])
            .query(&[("_embed", "1")])
            .send()
            .await?;

        let status = response.status();
        let total_pages = response
            .headers()
            .get(TOTAL_PAGES_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u32>().ok());
        let bytes = response.bytes().await?;
        debug!(status = status.as_u16(), ?total_pages, "Feed response");

        if status == StatusCode::BAD_REQUEST {
            let past_end = serde_json::from_slice::<WpError>(&bytes)
                .map(|e| e.code == INVALID_PAGE_CODE)
                .unwrap_or(false);
            if past_end {
                return Ok(NewsPage::empty(
                    page,
                    total_pages.unwrap_or(page.saturating_sub(1)),
                ));
            }
        }
        if !status.is_success() {
            let payload = serde_json::from_slice::<ErrorBody>(&bytes).ok();
            return Err(ApiError::server(status.as_u16(), payload.as_ref()));
        }

        let posts: Vec<WpPost> = serde_json::from_slice(&bytes)?;
        Ok(NewsPage {
            page,
            total_pages: total_pages.unwrap_or(page),
            items: posts.into_iter().map(News::from).collect(),
        })
    }
}
