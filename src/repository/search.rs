use std::sync::Arc;

use tracing::debug;

use super::{require_token, SearchRepository};
use crate::api::ApiClient;
use crate::framework::{one_shot, ResourceStream};
use crate::model::{Member, SearchQuery};
use crate::token::TokenStore;

pub struct ApiSearchRepository {
    api: Arc<dyn ApiClient>,
    tokens: Arc<dyn TokenStore>,
}

impl ApiSearchRepository {
    pub fn new(api: Arc<dyn ApiClient>, tokens: Arc<dyn TokenStore>) -> Self {
        Self { api, tokens }
    }
}

impl SearchRepository for ApiSearchRepository {
    /// A blank term matches nobody and is answered locally.
    fn search_members(&self, query: SearchQuery) -> ResourceStream<Vec<Member>> {
        let api = self.api.clone();
        let tokens = self.tokens.clone();
        one_shot("search_members", async move {
            let term = query.term.trim();
            if term.is_empty() {
                debug!("Blank search term");
                return Ok(Vec::new());
            }
            let query = SearchQuery {
                term: term.to_string(),
                page: query.page.max(1),
            };
            let token = require_token(tokens.as_ref()).await?;
            api.search_members(token, query).await?.into_result()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{Endpoint, MockApiClient};
    use crate::framework::Resource;
    use crate::repository::test_support::{collect, signed_in};

    #[tokio::test]
    async fn matching_members_are_returned() {
        let mock = Arc::new(MockApiClient::new());
        let member = Member {
            id: 11,
            username: "sunita".to_string(),
            full_name: "Sunita Bishnoi".to_string(),
            photo_url: None,
            city: Some("Bikaner".to_string()),
        };
        mock.expect(Endpoint::SearchMembers).return_ok(vec![member.clone()]);
        let repository = ApiSearchRepository::new(mock.clone(), signed_in());

        let items = collect(repository.search_members(SearchQuery::new(" sunita "))).await;

        assert_eq!(items, vec![Resource::Loading, Resource::success(vec![member])]);
        mock.verify();
    }

    #[tokio::test]
    async fn blank_term_never_reaches_the_server() {
        let mock = Arc::new(MockApiClient::new());
        let repository = ApiSearchRepository::new(mock.clone(), signed_in());

        let items = collect(repository.search_members(SearchQuery::new("   "))).await;

        assert_eq!(items, vec![Resource::Loading, Resource::success(Vec::new())]);
        assert_eq!(mock.total_calls(), 0);
    }

    #[tokio::test]
    async fn page_zero_is_sent_as_the_first_page() {
        let mock = Arc::new(MockApiClient::new());
        mock.expect(Endpoint::SearchMembers).return_ok(Vec::<Member>::new());
        let repository = ApiSearchRepository::new(mock.clone(), signed_in());

        let query = SearchQuery {
            term: "sunita".to_string(),
            page: 0,
        };
        let items = collect(repository.search_members(query)).await;

        assert_eq!(items.last(), Some(&Resource::success(Vec::new())));
        assert_eq!(mock.searches(), vec![SearchQuery::new("sunita")]);
    }
}
