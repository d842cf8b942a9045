//! Process-level wiring: the dependency container and tracing setup.

pub mod container;
pub mod tracing;

pub use self::container::*;
pub use self::tracing::setup_tracing;
