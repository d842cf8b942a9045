use serde::{Deserialize, Serialize};

/// Compact public view of another user, as shown in search results and post headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: u64,
    pub username: String,
    pub full_name: String,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

/// Member search parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub term: String,
    #[serde(default = "first_page")]
    pub page: u32,
}

fn first_page() -> u32 {
    1
}

impl SearchQuery {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            page: first_page(),
        }
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }
}
