//! # Observability & Tracing
//!
//! [`setup_tracing`] installs one compact `tracing-subscriber` formatter for the
//! whole process. Levels come from `RUST_LOG`.
//!
//! ## What Gets Traced
//!
//! - **Pipeline**: every emission at `debug` (`operation="fetch_news" Loading`),
//!   every error folded into an envelope at `warn`
//! - **HTTP**: one span per client call (`#[instrument]`), status codes at `debug`
//! - **Cache actors**: startup and shutdown at `info`, each request at `debug`
//! - **State holders**: job completion at `trace`
//!
//! ## Usage
//!
//! ```bash
//! # Emissions and HTTP status codes
//! RUST_LOG=debug cargo run
//!
//! # Only this crate, quiet dependencies
//! RUST_LOG=bishnoi_client=debug,reqwest=warn cargo run
//! ```
//!
//! **With `RUST_LOG=debug`**, a cold news fetch looks like:
//!
//! ```text
//! DEBUG Get cache="news" key=1 hit=false
//! DEBUG Cache miss operation="fetch_news"
//! DEBUG articles{page=1 per_page=10}: Feed response status=200 total_pages=Some(3)
//! DEBUG Put cache="news" key=1
//! DEBUG Success operation="fetch_news"
//! ```
//!
//! Tokens and passwords are redacted by their `Debug` impls, so `?request`
//! fields are safe to record.

pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
