use serde::{Deserialize, Serialize};

use crate::db::{LatestStateRow, SessionRow};
use crate::domain::DashboardView;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Body of `POST /api/log` and `POST /api/logoff`.
#[derive(Debug, Clone, Deserialize)]
pub struct LogRequest {
    #[serde(default)]
    pub username: Option<String>,
    pub clientname: String,
    pub servername: String,
    pub time: String,
}

#[derive(Debug, Deserialize)]
pub struct GenerateTokenRequest {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub message: String,
    pub token: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    #[serde(default)]
    pub view: DashboardView,
}

/// Rows for the dashboard, tagged with the view that produced them.
#[derive(Debug, Serialize)]
#[serde(tag = "view", content = "rows", rename_all = "lowercase")]
pub enum DashboardDto {
    Sessions(Vec<SessionRow>),
    Latest(Vec<LatestStateRow>),
}

#[derive(Debug, Serialize)]
pub struct HealthDto {
    pub status: &'static str,
    pub database: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
}
