pub mod register_user;

pub use register_user::{list_users, register_user};
