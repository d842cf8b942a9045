use std::sync::Arc;

use super::{require_token, SettingsRepository};
use crate::api::ApiClient;
use crate::framework::{one_shot, ResourceStream};
use crate::model::Settings;
use crate::token::TokenStore;

pub struct ApiSettingsRepository {
    api: Arc<dyn ApiClient>,
    tokens: Arc<dyn TokenStore>,
}

impl ApiSettingsRepository {
    pub fn new(api: Arc<dyn ApiClient>, tokens: Arc<dyn TokenStore>) -> Self {
        Self { api, tokens }
    }
}

impl SettingsRepository for ApiSettingsRepository {
    fn get_settings(&self) -> ResourceStream<Settings> {
        let api = self.api.clone();
        let tokens = self.tokens.clone();
        one_shot("get_settings", async move {
            let token = require_token(tokens.as_ref()).await?;
            api.get_settings(token).await?.into_result()
        })
    }

    fn update_settings(&self, settings: Settings) -> ResourceStream<Settings> {
        let api = self.api.clone();
        let tokens = self.tokens.clone();
        one_shot("update_settings", async move {
            let token = require_token(tokens.as_ref()).await?;
            api.update_settings(token, settings).await?.into_result()
        })
    }
}
