// Domain modules
pub mod hints;
pub mod tweets;
pub mod users;
