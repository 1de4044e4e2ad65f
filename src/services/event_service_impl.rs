//! `SeaORM` implementation of the `EventService` trait.

use async_trait::async_trait;
use tracing::debug;

use crate::db::Store;
use crate::domain::{EntityKind, EventKind, SessionEvent};
use crate::services::event_service::{EventError, EventService};

pub struct SeaOrmEventService {
    store: Store,
}

impl SeaOrmEventService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl EventService for SeaOrmEventService {
    async fn record(&self, kind: EventKind, event: &SessionEvent) -> Result<(), EventError> {
        let user_id = match event.username.as_deref() {
            Some(username) => Some(self.store.resolve(EntityKind::User, username).await?),
            None => None,
        };
        let client_id = self.store.resolve(EntityKind::Client, &event.client).await?;
        let server_id = self.store.resolve(EntityKind::Server, &event.server).await?;

        self.store
            .insert_event(kind, user_id, client_id, server_id, &event.timestamp)
            .await?;

        metrics::counter!("events_recorded_total", "kind" => kind.as_str()).increment(1);
        debug!(
            %kind,
            client = %event.client,
            server = %event.server,
            user = event.username.as_deref().unwrap_or("-"),
            timestamp = %event.timestamp,
            "Event recorded"
        );

        Ok(())
    }
}
