// Hint Leaderboard - API Core
//
// Fetches and posts tweets for registered accounts and ranks those accounts
// by how well they ask for hints. Infrastructure lives behind traits in
// kernel/; business logic lives in domains/*/activities.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
