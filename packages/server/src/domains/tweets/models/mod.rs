pub mod contest;
pub mod post;

pub use contest::ContestTweetRequest;
pub use post::{Post, PublishResult};
