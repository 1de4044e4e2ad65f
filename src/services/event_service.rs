//! Domain service for recording login and logoff events.
//!
//! Every referenced client, server and user is resolved (created on first
//! sight) before the event row is written. Timestamps are accepted as given.

use thiserror::Error;

use crate::db::ResolveContention;
use crate::domain::{EventKind, SessionEvent};

/// Errors specific to event recording.
#[derive(Debug, Error)]
pub enum EventError {
    /// A natural key stayed invisible after every get-or-create round.
    #[error("Contention: {0}")]
    Contention(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for EventError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for EventError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast_ref::<ResolveContention>() {
            Some(contention) => Self::Contention(contention.to_string()),
            None => Self::Database(format!("{err:#}")),
        }
    }
}

/// Domain service trait for event ingestion.
#[async_trait::async_trait]
pub trait EventService: Send + Sync {
    /// Resolves the event's entities and appends one fact row of `kind`.
    async fn record(&self, kind: EventKind, event: &SessionEvent) -> Result<(), EventError>;

    async fn record_login(&self, event: &SessionEvent) -> Result<(), EventError> {
        self.record(EventKind::Login, event).await
    }

    async fn record_logoff(&self, event: &SessionEvent) -> Result<(), EventError> {
        self.record(EventKind::Logoff, event).await
    }
}
