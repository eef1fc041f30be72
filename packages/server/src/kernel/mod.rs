//! Kernel module - server infrastructure and dependencies.

pub mod ai;
pub mod apify_source;
pub mod deps;
pub mod json_store;
pub mod test_dependencies;
pub mod traits;
pub mod x_client;

pub use ai::OpenAiCompletion;
pub use apify_source::ApifyPostSource;
pub use deps::ServerDeps;
pub use json_store::JsonFileStore;
pub use test_dependencies::TestDependencies;
pub use traits::*;
pub use x_client::{XApiError, XClient};
