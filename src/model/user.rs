use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered account as returned by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub email: String,
    pub full_name: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
