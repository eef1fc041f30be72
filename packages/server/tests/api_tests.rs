//! Router-level tests driving the axum app with mocked dependencies.

mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use server_core::kernel::test_dependencies::{
    InMemoryUserRegistry, MockAI, MockPostSource, TestDependencies,
};
use server_core::server::build_app;
use tower::ServiceExt;

use common::{hint_request, not_a_request, score};

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app.oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn health_reports_storage_and_upstreams() {
    let app = build_app(TestDependencies::new().into_server_deps());

    let (status, body) = send(app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage"]["status"], "ok");
    assert_eq!(body["postSource"], "configured");
}

#[tokio::test]
async fn register_then_list_users() {
    let test_deps = TestDependencies::new();
    let app = build_app(test_deps.into_server_deps());

    let (status, body) = send(
        app.clone(),
        Method::POST,
        "/users",
        Some(json!({ "username": "  alice " })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["username"], "alice");
    assert!(body["createdAt"].is_string());

    let (status, body) = send(app, Method::GET, "/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["username"], "alice");
}

#[tokio::test]
async fn duplicate_and_blank_usernames_are_rejected() {
    let test_deps =
        TestDependencies::new().mock_users(InMemoryUserRegistry::new().with_users(&["alice"]));
    let app = build_app(test_deps.into_server_deps());

    let (status, body) = send(
        app.clone(),
        Method::POST,
        "/users",
        Some(json!({ "username": "alice" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
    assert_eq!(body["kind"], "duplicate");
    assert_eq!(body["error"], "Username already exists: alice");
    assert!(body["timestamp"].is_string());

    let (status, body) = send(app, Method::POST, "/users", Some(json!({ "username": "" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "validation_error");
}

#[tokio::test]
async fn mistyped_and_missing_bodies_get_validation_error_body() {
    let app = build_app(TestDependencies::new().into_server_deps());

    let (status, body) = send(
        app.clone(),
        Method::POST,
        "/users",
        Some(json!({ "username": 42 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["kind"], "validation_error");

    let (status, body) = send(app.clone(), Method::POST, "/tweets", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "validation_error");

    let request = Request::builder()
        .method(Method::POST)
        .uri("/analyze/tweet")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"tweet\": "))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["kind"], "validation_error");
}

#[tokio::test]
async fn analyze_returns_ranked_leaderboard() {
    let test_deps = TestDependencies::new()
        .mock_users(InMemoryUserRegistry::new().with_users(&["alice", "bob"]))
        .mock_posts(
            MockPostSource::new()
                .with_posts("alice", &["please give me a hint", "nice weather today"])
                .with_posts("bob", &["lunch time"]),
        )
        .mock_ai(
            MockAI::new()
                .with_json_response(&hint_request(8.0))
                .with_json_response(&score(8.0, 7.0, 6.0, 9.0))
                .with_json_response(&not_a_request())
                .with_json_response(&not_a_request()),
        );
    let app = build_app(test_deps.into_server_deps());

    let (status, body) = send(app, Method::GET, "/analyze", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalUsers"], 2);
    assert!(body["analysisTime"].is_u64());
    assert_eq!(body["leaderboard"][0]["rank"], 1);
    assert_eq!(body["leaderboard"][0]["username"], "alice");
    assert_eq!(body["leaderboard"][0]["score"], 7.5);
    assert_eq!(body["leaderboard"][0]["hintRequestCount"], 1);
    assert_eq!(body["leaderboard"][1]["username"], "bob");
    assert_eq!(test_deps.analysis_store.save_count(), 1);
}

#[tokio::test]
async fn analyze_maps_rate_limit_to_429() {
    let test_deps = TestDependencies::new()
        .mock_users(InMemoryUserRegistry::new().with_users(&["alice"]))
        .mock_posts(MockPostSource::new().with_error("alice", "Too Many Requests (429)"));
    let app = build_app(test_deps.into_server_deps());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/analyze")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(response.headers()[header::RETRY_AFTER], "900");
}

#[tokio::test]
async fn fetch_tweets_wraps_posts_in_envelope() {
    let test_deps = TestDependencies::new()
        .mock_posts(MockPostSource::new().with_posts("alice", &["one", "two", "three"]));
    let app = build_app(test_deps.into_server_deps());

    let (status, body) = send(
        app.clone(),
        Method::POST,
        "/tweets",
        Some(json!({ "user": "alice", "maxTweets": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["data"][0]["id"], "alice-1");

    let (status, body) = send(
        app,
        Method::POST,
        "/tweets/latest",
        Some(json!({ "user": "alice" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["text"], "one");
    assert_eq!(
        test_deps.post_source.calls(),
        vec![("alice".to_string(), 2), ("alice".to_string(), 1)]
    );
}

#[tokio::test]
async fn fetch_tweets_for_unknown_user_is_404() {
    let app = build_app(TestDependencies::new().into_server_deps());

    let (status, body) = send(app, Method::POST, "/tweets", Some(json!({ "user": "ghost" }))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "upstream_not_found");
}

#[tokio::test]
async fn send_tweet_validates_then_publishes() {
    let test_deps = TestDependencies::new().mock_ai(
        MockAI::new().with_response("\"Tweet: Guess the number and win $50! #Contest\""),
    );
    let app = build_app(test_deps.into_server_deps());

    let (status, body) = send(
        app.clone(),
        Method::POST,
        "/tweet/send",
        Some(json!({ "username": "alice" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Missing required fields"));

    let (status, body) = send(
        app,
        Method::POST,
        "/tweet/send",
        Some(json!({
            "username": "alice",
            "amount": 50,
            "contractAddress": "0xabc",
            "betid": 3,
            "chainid": "8453",
            "replyToTweetId": "1234"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Tweet sent successfully");
    assert_eq!(body["data"]["id"], "mock-1");
    assert_eq!(body["data"]["text"], "Guess the number and win $50! #Contest");
    assert_eq!(body["data"]["inReplyTo"], "1234");

    assert!(test_deps
        .ai
        .was_called_with("https://fomo-wallet-frontend.vercel.app/0xabc/8453/3"));
    assert_eq!(test_deps.publisher.published().len(), 1);
}

#[tokio::test]
async fn analyze_single_tweet_endpoint() {
    let test_deps =
        TestDependencies::new().mock_ai(MockAI::new().with_json_response(&not_a_request()));
    let app = build_app(test_deps.into_server_deps());

    let (status, body) = send(
        app,
        Method::POST,
        "/analyze/tweet",
        Some(json!({ "tweet": "what a day" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["classification"]["type"], "none");
    assert_eq!(body["data"]["score"], Value::Null);
}
