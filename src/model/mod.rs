//! Immutable value records exchanged with the server and handed to state holders.

pub mod app;
pub mod auth;
pub mod member;
pub mod news;
pub mod post;
pub mod profile;
pub mod settings;
pub mod user;

pub use app::*;
pub use auth::*;
pub use member::*;
pub use news::*;
pub use post::*;
pub use profile::*;
pub use settings::*;
pub use user::*;
