use axum::{extract::Extension, http::StatusCode, Json};
use serde::Deserialize;

use crate::common::AnalysisError;
use crate::domains::users::{self, RegisteredUser};
use crate::server::app::AppState;
use crate::server::ApiJson;

#[derive(Debug, Deserialize)]
pub struct RegisterUserBody {
    #[serde(default)]
    pub username: String,
}

pub async fn register_user_handler(
    Extension(state): Extension<AppState>,
    ApiJson(body): ApiJson<RegisterUserBody>,
) -> Result<(StatusCode, Json<RegisteredUser>), AnalysisError> {
    let user = users::register_user(&body.username, &state.deps).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn list_users_handler(
    Extension(state): Extension<AppState>,
) -> Result<Json<Vec<RegisteredUser>>, AnalysisError> {
    Ok(Json(users::list_users(&state.deps).await?))
}
