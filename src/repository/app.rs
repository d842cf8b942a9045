use std::sync::Arc;

use tracing::info;

use super::AppRepository;
use crate::api::ApiClient;
use crate::framework::{one_shot, ResourceStream};
use crate::model::VersionStatus;

/// Version gate. Works signed out.
pub struct ApiAppRepository {
    api: Arc<dyn ApiClient>,
    platform: String,
}

impl ApiAppRepository {
    pub fn new(api: Arc<dyn ApiClient>, platform: impl Into<String>) -> Self {
        Self {
            api,
            platform: platform.into(),
        }
    }
}

impl AppRepository for ApiAppRepository {
    fn check_app_version(&self, current: String) -> ResourceStream<VersionStatus> {
        let api = self.api.clone();
        let platform = self.platform.clone();
        one_shot("check_app_version", async move {
            let release = api.check_app_version(platform).await?.into_result()?;
            let status = release.status_for(&current);
            info!(%current, latest = %release.latest, ?status, "Version checked");
            Ok(status)
        })
    }
}
