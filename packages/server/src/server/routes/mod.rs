// HTTP routes
pub mod analyze;
pub mod health;
pub mod tweets;
pub mod users;

pub use analyze::*;
pub use health::*;
pub use tweets::*;
pub use users::*;
