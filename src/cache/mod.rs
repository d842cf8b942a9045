//! Local cache used by cache-then-network reads.
//!
//! The store is owned by a single task ([`CacheActor`]); callers talk to it
//! through a cloneable [`CacheClient`]. No locks guard the map because only the
//! actor ever touches it.

pub mod actor;

pub use actor::*;
