use serde::Deserialize;
use serde_json::Value;

use crate::domain::{AppId, AppInfo, ProjectId};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid app response: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct AppJsonResponse {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
}

pub fn app_endpoint(project_id: &ProjectId, app_id: &AppId) -> String {
    format!(
        "/v1/projects/{}/apps/{}",
        project_id.as_str(),
        app_id.as_str()
    )
}

pub fn decode_app_response(json: Value) -> Result<AppInfo, TransportError> {
    let parsed = AppJsonResponse::deserialize(&json)?;
    Ok(AppInfo {
        id: parsed.id,
        display_name: parsed.display_name,
        raw: json,
    })
}
