//! UI-facing state holders.
//!
//! A holder is the per-screen consumer of the pipeline: it owns the screen's
//! state, starts pipeline work on user intent and tears it down with the screen.

pub mod auth;
pub mod holder;

pub use auth::*;
pub use holder::*;
