//! Client configuration.
//!
//! Loaded from `config.toml` under the platform config directory
//! (`~/.config/bishnoi/config.toml` on Linux). A missing file yields defaults.

pub mod loader;
pub mod types;

pub use loader::*;
pub use types::*;
