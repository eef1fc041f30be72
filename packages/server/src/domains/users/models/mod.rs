pub mod registered_user;

pub use registered_user::RegisteredUser;
