pub mod activities;
pub mod models;

pub use activities::{list_users, register_user};
pub use models::RegisteredUser;
