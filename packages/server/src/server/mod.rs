// HTTP server setup (Axum)
pub mod app;
pub mod error;
pub mod extract;
pub mod response;
pub mod routes;

pub use app::*;
pub use extract::ApiJson;
pub use response::ApiResponse;
