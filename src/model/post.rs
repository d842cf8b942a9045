use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Member, Visibility};

/// A community post with its comment thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub author: Member,
    pub text: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    pub author: Member,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Payload for `POST /api/posts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPost {
    pub text: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub visibility: Visibility,
}
