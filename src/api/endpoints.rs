//! Paths of the REST API, relative to the configured base URL.

pub const ENDPOINT_REGISTER: &str = "api/register";
pub const ENDPOINT_LOGIN: &str = "api/login";
pub const ENDPOINT_LOGOUT: &str = "api/logout";
pub const ENDPOINT_PROFILE: &str = "api/profile";
pub const ENDPOINT_PROFILE_PHOTO: &str = "api/profile/photo";
pub const ENDPOINT_MEMBER_SEARCH: &str = "api/members/search";
pub const ENDPOINT_SETTINGS: &str = "api/settings";
pub const ENDPOINT_POSTS: &str = "api/posts";
pub const ENDPOINT_APP_VERSION: &str = "api/app/version";
