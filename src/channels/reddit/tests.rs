use super::*;
use crate::channels::traits::{Channel, ReplySink};
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn channel_for(server: &MockServer) -> RedditChannel {
    RedditChannel::new(
        "client".into(),
        "secret".into(),
        "roastbot".into(),
        "hunter2".into(),
        vec!["india".into(), "memes".into()],
    )
    .with_base_urls(&server.uri(), &server.uri())
    .with_poll_interval(Duration::from_millis(10))
}

fn listing(ids: &[&str]) -> serde_json::Value {
    let children: Vec<serde_json::Value> = ids
        .iter()
        .map(|id| {
            serde_json::json!({
                "kind": "t1",
                "data": {
                    "id": id,
                    "body": format!("comment {id}"),
                    "author": "someone",
                    "subreddit": "india",
                    "created_utc": 1_700_000_000.0
                }
            })
        })
        .collect();
    serde_json::json!({"kind": "Listing", "data": {"children": children}})
}

async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/v1/access_token"))
        .and(body_string_contains("grant_type=password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "tok-123",
            "token_type": "bearer",
            "expires_in": 3600
        })))
        .mount(server)
        .await;
}

#[test]
fn reddit_channel_name() {
    let ch = RedditChannel::new(
        "id".into(),
        "secret".into(),
        "bot".into(),
        "pw".into(),
        vec![],
    );
    assert_eq!(ch.name(), "reddit");
}

#[test]
fn stream_url_joins_subreddits() {
    let ch = RedditChannel::new(
        "id".into(),
        "secret".into(),
        "bot".into(),
        "pw".into(),
        vec!["india".into(), "memes".into()],
    );
    assert_eq!(
        ch.stream_url(),
        "https://oauth.reddit.com/r/india+memes/comments"
    );
}

#[test]
fn from_config_requires_credentials() {
    let config = RedditConfig::default();
    let err = RedditChannel::from_config(&config).err().unwrap();
    assert!(err.to_string().contains("reddit.client_id"));
}

#[test]
fn seen_comments_dedupes_and_evicts() {
    let mut seen = SeenComments::default();
    assert!(seen.insert("a"));
    assert!(!seen.insert("a"));
    for i in 0..SEEN_CAPACITY {
        seen.insert(&format!("x{i}"));
    }
    assert!(seen.insert("a"), "oldest id should have been evicted");
}

#[tokio::test]
async fn authenticate_fetches_identity() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/v1/me"))
        .and(header("Authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"name": "roastbot"})))
        .expect(1)
        .mount(&server)
        .await;

    let ch = channel_for(&server);
    ch.authenticate().await.unwrap();
}

#[tokio::test]
async fn bad_password_is_an_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/access_token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"error": "invalid_grant"})),
        )
        .mount(&server)
        .await;

    let ch = channel_for(&server);
    let err = ch.authenticate().await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<TransportError>(),
        Some(TransportError::Auth { .. })
    ));
    assert!(err.to_string().contains("invalid_grant"));
}

#[tokio::test]
async fn token_is_cached_between_calls() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "tok-123",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ch = channel_for(&server);
    assert_eq!(ch.access_token().await.unwrap(), "tok-123");
    assert_eq!(ch.access_token().await.unwrap(), "tok-123");
}

#[tokio::test]
async fn listen_skips_existing_and_forwards_new_comments() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    Mock::given(method("GET"))
        .and(path("/r/india+memes/comments"))
        .and(query_param("limit", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(&["c2", "c1"])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/r/india+memes/comments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(&["c4", "c3", "c2"])))
        .mount(&server)
        .await;

    let ch = channel_for(&server);
    let (tx, mut rx) = tokio::sync::mpsc::channel(8);
    let handle = tokio::spawn(async move { ch.listen(tx).await });

    let first = rx.recv().await.unwrap();
    let second = rx.recv().await.unwrap();
    assert_eq!(first.id, "c3");
    assert_eq!(second.id, "c4");

    drop(rx);
    handle.abort();
}

#[tokio::test]
async fn listen_fails_when_token_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/access_token"))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .mount(&server)
        .await;

    let ch = channel_for(&server);
    let (tx, _rx) = tokio::sync::mpsc::channel(1);
    let err = ch.listen(tx).await.unwrap_err();
    assert!(err.to_string().contains("authentication failed"));
}

#[tokio::test]
async fn reply_posts_comment_with_thing_id() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/comment"))
        .and(body_string_contains("thing_id=t1_abc"))
        .and(body_string_contains("api_type=json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"json": {"errors": [], "data": {}}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let ch = channel_for(&server);
    ch.reply("abc", "lol\n\ni am a bot").await.unwrap();
}

#[tokio::test]
async fn reply_surfaces_api_errors() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/comment"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "json": {"errors": [["RATELIMIT", "you are doing that too much", "ratelimit"]]}
        })))
        .mount(&server)
        .await;

    let ch = channel_for(&server);
    let err = ch.reply("abc", "hi").await.unwrap_err();
    assert!(err.to_string().contains("RATELIMIT"));
}

#[tokio::test]
async fn health_check_reports_identity_endpoint() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/v1/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"name": "roastbot"})))
        .expect(1)
        .mount(&server)
        .await;

    let ch = channel_for(&server);
    assert!(ch.health_check().await);
}

#[tokio::test]
async fn health_check_fails_on_server_error() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/v1/me"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let ch = channel_for(&server);
    assert!(!ch.health_check().await);
}
