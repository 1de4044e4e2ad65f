//! Domain service for the read-only reports behind the dashboard and stats pages.

use serde::Serialize;
use thiserror::Error;

use crate::db::{LatestStateRow, SessionRow, UsageRow};

/// Errors specific to report queries.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for ReportError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for ReportError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

/// Login counts per client and per server, busiest first.
#[derive(Debug, Clone, Serialize)]
pub struct UsageReport {
    pub clients: Vec<UsageRow>,
    pub servers: Vec<UsageRow>,
}

/// Domain service trait for reporting.
#[async_trait::async_trait]
pub trait ReportService: Send + Sync {
    /// Logins that have a later logoff for the same user, client and server.
    async fn closed_sessions(&self) -> Result<Vec<SessionRow>, ReportError>;

    /// Latest login and latest logoff per client/server pair.
    ///
    /// The logoff column is the newest logoff for the pair overall; it is
    /// not correlated with the login beside it.
    async fn latest_state(&self) -> Result<Vec<LatestStateRow>, ReportError>;

    async fn usage(&self) -> Result<UsageReport, ReportError>;
}
