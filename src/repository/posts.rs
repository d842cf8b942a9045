use std::sync::Arc;

use super::{require_token, PostRepository};
use crate::api::ApiClient;
use crate::framework::{one_shot, ResourceStream};
use crate::model::{NewPost, Post};
use crate::token::TokenStore;

pub struct ApiPostRepository {
    api: Arc<dyn ApiClient>,
    tokens: Arc<dyn TokenStore>,
}

impl ApiPostRepository {
    pub fn new(api: Arc<dyn ApiClient>, tokens: Arc<dyn TokenStore>) -> Self {
        Self { api, tokens }
    }
}

impl PostRepository for ApiPostRepository {
    fn create_post(&self, post: NewPost) -> ResourceStream<Post> {
        let api = self.api.clone();
        let tokens = self.tokens.clone();
        one_shot("create_post", async move {
            let token = require_token(tokens.as_ref()).await?;
            api.create_post(token, post).await?.into_result()
        })
    }

    fn list_posts(&self, page: u32) -> ResourceStream<Vec<Post>> {
        let api = self.api.clone();
        let tokens = self.tokens.clone();
        let page = page.max(1);
        one_shot("list_posts", async move {
            let token = require_token(tokens.as_ref()).await?;
            api.list_posts(token, page).await?.into_result()
        })
    }
}
