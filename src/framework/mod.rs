//! Generic resource pipeline.
//!
//! This module provides the building blocks every repository uses to expose an
//! asynchronous operation as an ordered stream of lifecycle states.
//!
//! # Main Components
//!
//! - [`Resource`] - The Loading / Success / Error envelope
//! - [`ResourceStream`] - Lazy stream of envelopes for one invocation
//! - [`one_shot`] and [`cache_then_network`] - Stream builders
//! - [`ResourceStreamExt`] - Cancellation tied to the consumer's scope

pub mod flow;
pub mod resource;

pub use flow::*;
pub use resource::*;
