//! # bishnoi
//!
//! Demo entry point: checks the app version and prints the first news page by
//! following the pipeline emissions.

use bishnoi_client::config::Config;
use bishnoi_client::framework::Resource;
use bishnoi_client::lifecycle::{setup_tracing, AppContainer};
use bishnoi_client::model::VersionStatus;
use futures::StreamExt;
use tracing::{error, info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = Config::load().map_err(|e| e.to_string())?;
    info!(api = %config.api.base_url, feed = %config.feed.base_url, "Starting");

    let app = AppContainer::new(config)
        .await
        .map_err(|e| e.to_string())?;

    let span = tracing::info_span!("version_check");
    async {
        let mut states = app
            .use_cases
            .check_app_version
            .execute(env!("CARGO_PKG_VERSION").to_string());
        while let Some(state) = states.next().await {
            match state {
                Resource::Loading => info!("Checking for updates"),
                Resource::Success {
                    data: VersionStatus::UpToDate,
                } => info!("Up to date"),
                Resource::Success {
                    data: VersionStatus::UpdateAvailable { latest },
                } => info!(%latest, "Update available"),
                Resource::Success {
                    data: VersionStatus::UpdateRequired { minimum_supported },
                } => warn!(%minimum_supported, "Update required"),
                Resource::Error { message, .. } => warn!(%message, "Version check failed"),
            }
        }
    }
    .instrument(span)
    .await;

    let span = tracing::info_span!("news");
    async {
        let mut states = app.use_cases.fetch_news.execute(1);
        while let Some(state) = states.next().await {
            match state {
                Resource::Loading => info!("Loading news"),
                Resource::Success { data } => {
                    info!(page = data.page, total_pages = data.total_pages, "News page");
                    for item in &data.items {
                        info!(id = item.id, published = %item.published_at, "{}", item.title);
                    }
                }
                Resource::Error { message, data } => {
                    let stale = data.map_or(0, |page| page.items.len());
                    error!(%message, stale, "News failed");
                }
            }
        }
    }
    .instrument(span)
    .await;

    app.shutdown().await?;

    info!("Done");
    Ok(())
}
