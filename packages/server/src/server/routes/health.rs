use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    status: String,
    storage: StorageHealth,
    post_source: &'static str,
    publisher: &'static str,
}

#[derive(Serialize)]
pub struct StorageHealth {
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health check endpoint
///
/// Reads the user registry to prove the data directory is usable and
/// reports which optional upstreams are configured. Returns 503 when the
/// registry cannot be read.
pub async fn health_handler(
    Extension(state): Extension<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let storage = match tokio::time::timeout(
        std::time::Duration::from_secs(5),
        state.deps.user_registry.list_users(),
    )
    .await
    {
        Ok(Ok(_)) => StorageHealth {
            status: "ok".to_string(),
            error: None,
        },
        Ok(Err(e)) => StorageHealth {
            status: "error".to_string(),
            error: Some(format!("Read failed: {:#}", e)),
        },
        Err(_) => StorageHealth {
            status: "error".to_string(),
            error: Some("Read timeout (>5s)".to_string()),
        },
    };

    let configured = |present: bool| if present { "configured" } else { "disabled" };
    let is_healthy = storage.status == "ok";

    let status_code = if is_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(HealthResponse {
            status: if is_healthy { "healthy" } else { "unhealthy" }.to_string(),
            storage,
            post_source: configured(state.deps.post_source.is_some()),
            publisher: configured(state.deps.publisher.is_some()),
        }),
    )
}
