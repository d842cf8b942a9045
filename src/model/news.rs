use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One article from the content feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct News {
    pub id: u64,
    pub title: String,
    /// Rendered HTML body.
    pub content: String,
    pub media_url: Option<String>,
    pub published_at: DateTime<Utc>,
}

/// A page of the feed listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsPage {
    pub page: u32,
    pub total_pages: u32,
    pub items: Vec<News>,
}

impl NewsPage {
    pub fn empty(page: u32, total_pages: u32) -> Self {
        Self {
            page,
            total_pages,
            items: Vec::new(),
        }
    }

    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }
}
