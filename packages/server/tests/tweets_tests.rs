//! Tweet fetching and contest posting activities.

use server_core::domains::tweets::{
    fetch_latest_tweet, fetch_tweets, send_contest_tweet, ContestTweetRequest,
};
use server_core::kernel::test_dependencies::{MockAI, MockPostSource, TestDependencies};

#[tokio::test]
async fn default_page_size_is_ten() {
    let test_deps =
        TestDependencies::new().mock_posts(MockPostSource::new().with_posts("alice", &["a"]));
    let deps = test_deps.into_server_deps();

    let posts = fetch_tweets(" alice ", None, &deps).await.unwrap();

    assert_eq!(posts.len(), 1);
    assert_eq!(test_deps.post_source.calls(), vec![("alice".to_string(), 10)]);
}

#[tokio::test]
async fn blank_user_is_rejected_before_fetching() {
    let test_deps = TestDependencies::new();
    let deps = test_deps.into_server_deps();

    let err = fetch_tweets("", Some(5), &deps).await.unwrap_err();

    assert_eq!(err.kind(), "validation_error");
    assert_eq!(test_deps.post_source.call_count(), 0);
}

#[tokio::test]
async fn latest_tweet_of_empty_timeline_is_none() {
    let test_deps =
        TestDependencies::new().mock_posts(MockPostSource::new().with_posts("quiet", &[]));
    let deps = test_deps.into_server_deps();

    assert_eq!(fetch_latest_tweet("quiet", &deps).await.unwrap(), None);
}

#[tokio::test]
async fn contest_tweet_is_cleaned_and_truncated_before_publishing() {
    let long = format!("Tweet: {}", "x".repeat(400));
    let test_deps = TestDependencies::new().mock_ai(MockAI::new().with_response(long));
    let deps = test_deps.into_server_deps();

    let request: ContestTweetRequest = serde_json::from_value(serde_json::json!({
        "username": "alice",
        "amount": 10,
        "contractAddress": "0xdef",
        "betId": "9",
        "chainId": 1
    }))
    .unwrap();

    let result = send_contest_tweet(&request, &deps).await.unwrap();

    assert_eq!(result.text.chars().count(), 280);
    assert!(result.text.starts_with("xxx"));
    assert!(result.text.ends_with("..."));
    assert_eq!(result.in_reply_to, None);

    let prompt = test_deps.ai.last_prompt().unwrap();
    assert!(prompt.contains("Host: @alice"));
    assert!(prompt.contains("Prize Amount: $10"));
    assert!(prompt.ends_with("Tweet:"));
}

#[tokio::test]
async fn failed_generation_publishes_nothing() {
    let test_deps = TestDependencies::new().mock_ai(MockAI::new().with_error("model overloaded"));
    let deps = test_deps.into_server_deps();

    let request: ContestTweetRequest = serde_json::from_value(serde_json::json!({
        "username": "alice",
        "amount": 10,
        "contractAddress": "0xdef",
        "betid": "9",
        "chainid": "1"
    }))
    .unwrap();

    assert!(send_contest_tweet(&request, &deps).await.is_err());
    assert!(test_deps.publisher.published().is_empty());
}
