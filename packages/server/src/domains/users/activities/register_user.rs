use crate::common::AnalysisError;
use crate::domains::users::models::RegisteredUser;
use crate::kernel::ServerDeps;

/// Register a username for hint analysis.
///
/// The name is trimmed before storage; empty names fail validation and a name
/// that is already registered is reported as a duplicate.
pub async fn register_user(
    username: &str,
    deps: &ServerDeps,
) -> Result<RegisteredUser, AnalysisError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(AnalysisError::Validation("Valid username required".into()));
    }

    let user = RegisteredUser::new(username);
    let inserted = deps.user_registry.insert_user(user.clone()).await?;
    if !inserted {
        return Err(AnalysisError::Duplicate(format!(
            "Username already exists: {}",
            username
        )));
    }

    tracing::info!(username = %user.username, "Registered user");
    Ok(user)
}

pub async fn list_users(deps: &ServerDeps) -> Result<Vec<RegisteredUser>, AnalysisError> {
    Ok(deps.user_registry.list_users().await?)
}
