use std::time::Duration;

use bishnoi_client::config::Config;
use bishnoi_client::framework::{Resource, ResourceStreamExt};
use bishnoi_client::lifecycle::AppContainer;
use bishnoi_client::model::LoginRequest;
use futures::StreamExt;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(api: &MockServer, feed: &MockServer) -> Config {
    let mut config = Config::default();
    config.api.base_url = api.uri();
    config.api.platform = "android".to_string();
    config.feed.base_url = feed.uri();
    config.feed.per_page = 5;
    config
}

fn profile_json(full_name: &str) -> serde_json::Value {
    json!({
        "user_id": 7,
        "username": "ravi_b",
        "full_name": full_name,
        "social_media": {}
    })
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "tok-123",
            "user": {
                "id": 7,
                "username": "ravi_b",
                "email": "ravi@example.com",
                "full_name": "Ravi Bishnoi"
            }
        })))
        .expect(1)
        .mount(server)
        .await;
}

/// Login, profile read through the cache, logout: the full authenticated flow.
#[tokio::test]
async fn test_login_profile_logout_flow() {
    let api = MockServer::start().await;
    let feed = MockServer::start().await;
    mount_login(&api).await;
    Mock::given(method("GET"))
        .and(path("/api/profile"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_json("Ravi Bishnoi")))
        .up_to_n_times(1)
        .mount(&api)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/profile"))
        .respond_with(
            ResponseTemplate::new(503).set_body_json(json!({"message": "Maintenance window"})),
        )
        .mount(&api)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/logout"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&api)
        .await;

    let app = AppContainer::new(config_for(&api, &feed))
        .await
        .expect("Failed to build container");

    // Login persists the token
    let login: Vec<_> = app
        .use_cases
        .login
        .execute(LoginRequest {
            email: "ravi@example.com".to_string(),
            password: "correct horse".to_string(),
        })
        .collect()
        .await;
    assert!(login[0].is_loading());
    assert_eq!(login[1].data().map(|u| u.id), Some(7));
    assert!(app.tokens.is_logged_in().await);

    // Cold profile read: Loading then Success
    let first: Vec<_> = app.use_cases.fetch_profile.execute().collect().await;
    assert_eq!(first.len(), 2);
    assert_eq!(first[1].data().map(|p| p.full_name.as_str()), Some("Ravi Bishnoi"));

    // Warm read with the server down: cached profile, Loading, Error carrying the cache
    let second: Vec<_> = app.use_cases.fetch_profile.execute().collect().await;
    assert_eq!(second.len(), 3);
    assert!(second[0].is_success());
    assert!(second[1].is_loading());
    match &second[2] {
        Resource::Error { message, data } => {
            assert_eq!(message.as_str(), "Maintenance window");
            assert_eq!(data.as_ref().map(|p| p.user_id), Some(7));
        }
        other => panic!("expected error with cached profile, got {other:?}"),
    }

    // Logout clears the token and the profile cache
    let logout: Vec<_> = app.use_cases.logout.execute().collect().await;
    assert_eq!(logout.last(), Some(&Resource::success(())));
    assert!(!app.tokens.is_logged_in().await);

    let signed_out: Vec<_> = app.use_cases.fetch_profile.execute().collect().await;
    assert_eq!(
        signed_out,
        vec![Resource::Loading, Resource::error("Not logged in", None)]
    );

    app.shutdown().await.expect("Shutdown failed");
}

fn session_json(token: &str, id: u64, username: &str) -> serde_json::Value {
    json!({
        "token": token,
        "user": {
            "id": id,
            "username": username,
            "email": format!("{username}@example.com"),
            "full_name": username
        }
    })
}

/// A second account signing in without a logout never sees the first one's profile.
#[tokio::test]
async fn test_switching_accounts_hides_previous_profile() {
    let api = MockServer::start().await;
    let feed = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_json("tok-ravi", 7, "ravi_b")))
        .up_to_n_times(1)
        .mount(&api)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_json("tok-sunita", 11, "sunita")))
        .mount(&api)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/profile"))
        .and(header("authorization", "Bearer tok-ravi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_json("Ravi Bishnoi")))
        .mount(&api)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/profile"))
        .and(header("authorization", "Bearer tok-sunita"))
        .respond_with(
            ResponseTemplate::new(503).set_body_json(json!({"message": "Maintenance window"})),
        )
        .mount(&api)
        .await;

    let app = AppContainer::new(config_for(&api, &feed))
        .await
        .expect("Failed to build container");
    let login = |email: &str| LoginRequest {
        email: email.to_string(),
        password: "correct horse".to_string(),
    };

    let _: Vec<_> = app.use_cases.login.execute(login("ravi@example.com")).collect().await;
    let ravi: Vec<_> = app.use_cases.fetch_profile.execute().collect().await;
    assert_eq!(ravi.last().and_then(|r| r.data()).map(|p| p.user_id), Some(7));

    let _: Vec<_> = app.use_cases.login.execute(login("sunita@example.com")).collect().await;
    let sunita: Vec<_> = app.use_cases.fetch_profile.execute().collect().await;
    assert_eq!(
        sunita,
        vec![Resource::Loading, Resource::error("Maintenance window", None)]
    );

    app.shutdown().await.expect("Shutdown failed");
}

/// News comes from the CMS feed and needs no login.
#[tokio::test]
async fn test_news_feed_pages() {
    let api = MockServer::start().await;
    let feed = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wp-json/wp/v2/posts"))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "5"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-WP-TotalPages", "1")
                .set_body_json(json!([{
                    "id": 1,
                    "date_gmt": "2024-09-10T06:00:00",
                    "title": {"rendered": "Khejarli day"},
                    "content": {"rendered": "<p>Remembering Amrita Devi</p>"}
                }])),
        )
        .mount(&feed)
        .await;
    Mock::given(method("GET"))
        .and(path("/wp-json/wp/v2/posts"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": "rest_post_invalid_page_number",
            "message": "The page number requested is larger than the number of pages available."
        })))
        .mount(&feed)
        .await;

    let app = AppContainer::new(config_for(&api, &feed))
        .await
        .expect("Failed to build container");

    let first: Vec<_> = app.use_cases.fetch_news.execute(1).collect().await;
    let page = first.last().and_then(Resource::data).expect("news page");
    assert_eq!(page.items[0].title, "Khejarli day");
    assert!(!page.has_more());

    let past_end: Vec<_> = app.use_cases.fetch_news.execute(2).collect().await;
    let empty = past_end.last().and_then(Resource::data).expect("empty page");
    assert!(empty.items.is_empty());

    app.shutdown().await.expect("Shutdown failed");
}

/// A dismissed screen stops receiving emissions while the server is still answering.
#[tokio::test]
async fn test_cancelled_request_emits_nothing_more() {
    let api = MockServer::start().await;
    let feed = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/app/version"))
        .and(query_param("platform", "android"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(5))
                .set_body_json(json!({"latest": "9.9.9", "minimum_supported": "1.0.0"})),
        )
        .mount(&api)
        .await;

    let app = AppContainer::new(config_for(&api, &feed))
        .await
        .expect("Failed to build container");

    let scope = CancellationToken::new();
    let mut states = app
        .use_cases
        .check_app_version
        .execute("1.0.0".to_string())
        .with_cancellation(scope.clone());

    assert_eq!(states.next().await, Some(Resource::Loading));
    let canceller = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        scope.cancel();
    });

    let rest = tokio::time::timeout(Duration::from_secs(2), states.next())
        .await
        .expect("cancellation should end the stream promptly");
    assert_eq!(rest, None);
    canceller.await.unwrap();

    app.shutdown().await.expect("Shutdown failed");
}

/// Validation failures never produce a request.
#[tokio::test]
async fn test_invalid_login_form_makes_no_request() {
    let api = MockServer::start().await;
    let feed = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&api)
        .await;

    let app = AppContainer::new(config_for(&api, &feed))
        .await
        .expect("Failed to build container");

    let holder = app.login_holder();
    assert!(holder.submit("", "").is_none());
    let state = holder.state();
    assert_eq!(state.email_error.as_deref(), Some("Email cannot be empty"));
    assert_eq!(state.password_error.as_deref(), Some("Password cannot be empty"));

    app.shutdown().await.expect("Shutdown failed");
}
