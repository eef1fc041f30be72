//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::routes::{
    analyze_handler, analyze_tweet_handler, fetch_latest_tweet_handler, fetch_tweets_handler,
    health_handler, list_users_handler, register_user_handler, send_tweet_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: Arc<ServerDeps>,
}

/// Build the Axum application router
pub fn build_app(deps: ServerDeps) -> Router {
    let state = AppState {
        deps: Arc::new(deps),
    };

    // CORS configuration - allow any origin, the API carries no credentials
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health_handler))
        // Registered users
        .route("/users", post(register_user_handler).get(list_users_handler))
        // Tweets for a single account
        .route("/tweets", post(fetch_tweets_handler))
        .route("/tweets/latest", post(fetch_latest_tweet_handler))
        .route("/tweet/send", post(send_tweet_handler))
        // Hint analysis
        .route("/analyze", get(analyze_handler))
        .route("/analyze/tweet", post(analyze_tweet_handler))
        .layer(Extension(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
