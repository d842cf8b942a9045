//! # Bishnoi Client Core
//!
//! > **Every async operation as a stream of Loading / Success / Error.**
//!
//! This crate is the client-side core of the community app: REST and feed
//! clients, a local cache, repositories, use cases and per-screen state holders.
//! Every operation (login, registration, profile fetch and edits, photo upload,
//! news, posts, search, settings, version check) is exposed the same way: as a
//! lazy stream of [`Resource`](framework::Resource) envelopes.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### One consumption contract
//! A screen never branches on *which* operation it called. It matches on
//! `Loading`, `Success { data }` and `Error { message, data }` and renders.
//! The `data` on `Error` is the last known good value, so a failed refresh
//! keeps the cached profile or news page on screen.
//!
//! ### Ordering and cancellation
//! Emissions are strictly ordered and a stream ends after its single terminal
//! state. Dropping a stream (or firing the token passed to
//! [`with_cancellation`](framework::ResourceStreamExt::with_cancellation))
//! abandons the in-flight request; nothing further is emitted.
//!
//! ### Injected state
//! The auth token lives behind the [`TokenStore`](token::TokenStore) trait and
//! is handed to every component that needs it. There is no global.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Envelope ([`framework`])
//! - **Role**: the [`Resource`](framework::Resource) sum type and the two
//!   stream shapes every repository is built from.
//! - **Key items**: [`one_shot`](framework::one_shot),
//!   [`cache_then_network`](framework::cache_then_network).
//!
//! ### 2. The Collaborators ([`api`], [`feed`], [`token`], [`cache`])
//! - **Role**: HTTP access to the REST API and the CMS news feed, token
//!   persistence, and an actor-owned in-memory cache.
//! - **Key items**: [`ApiClient`](api::ApiClient), [`FeedClient`](feed::FeedClient),
//!   [`CacheClient`](cache::CacheClient).
//!
//! ### 3. The Operations ([`repository`], [`use_cases`])
//! - **Role**: one repository trait per feature area returning
//!   [`ResourceStream`](framework::ResourceStream)s; one use case per operation.
//!
//! ### 4. The Screens ([`state`], [`validation`])
//! - **Role**: [`StateHolder`](state::StateHolder) folds a pipeline into
//!   watchable UI state; the auth holders validate input before any request.
//!
//! ### 5. The Orchestrator ([`lifecycle`], [`config`])
//! - **Role**: [`AppContainer`](lifecycle::AppContainer) wires everything from a
//!   TOML [`Config`](config::Config) and shuts the cache actors down.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Version check and first news page against the configured servers
//! RUST_LOG=info cargo run
//!
//! cargo test
//! ```
//!
//! ## 🧪 Testing
//!
//! [`api::mock::MockApiClient`] and [`feed::mock::MockFeedClient`] replace the
//! network in unit and integration tests.

pub mod api;
pub mod cache;
pub mod config;
pub mod feed;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod repository;
pub mod state;
pub mod token;
pub mod use_cases;
pub mod validation;
