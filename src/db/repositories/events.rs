use crate::domain::EventKind;
use crate::entities::{logins, logoffs, prelude::*};
use anyhow::{Context, Result};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, Set};

/// Append-only storage for login and logoff facts.
pub struct EventRepository {
    conn: DatabaseConnection,
}

impl EventRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn insert(
        &self,
        kind: EventKind,
        user_id: Option<i32>,
        client_id: i32,
        server_id: i32,
        timestamp: &str,
    ) -> Result<()> {
        match kind {
            EventKind::Login => {
                let active_model = logins::ActiveModel {
                    user_id: Set(user_id),
                    client_id: Set(client_id),
                    server_id: Set(server_id),
                    timestamp: Set(timestamp.to_string()),
                    ..Default::default()
                };
                Logins::insert(active_model)
                    .exec_without_returning(&self.conn)
                    .await
                    .context("Failed to insert login")?;
            }
            EventKind::Logoff => {
                let active_model = logoffs::ActiveModel {
                    user_id: Set(user_id),
                    client_id: Set(client_id),
                    server_id: Set(server_id),
                    timestamp: Set(timestamp.to_string()),
                    ..Default::default()
                };
                Logoffs::insert(active_model)
                    .exec_without_returning(&self.conn)
                    .await
                    .context("Failed to insert logoff")?;
            }
        }

        Ok(())
    }

    pub async fn count(&self, kind: EventKind) -> Result<u64> {
        let count = match kind {
            EventKind::Login => Logins::find().count(&self.conn).await?,
            EventKind::Logoff => Logoffs::find().count(&self.conn).await?,
        };
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::temp_store;
    use crate::domain::EntityKind;

    #[tokio::test]
    async fn inserts_land_in_their_own_table() {
        let store = temp_store("events-insert").await;
        let repo = EventRepository::new(store.conn.clone());

        let client = store.resolve(EntityKind::Client, "c1").await.unwrap();
        let server = store.resolve(EntityKind::Server, "s1").await.unwrap();

        repo.insert(EventKind::Login, None, client, server, "2024-01-01T10:00:00")
            .await
            .unwrap();
        repo.insert(EventKind::Login, None, client, server, "2024-01-01T10:00:00")
            .await
            .unwrap();
        repo.insert(EventKind::Logoff, None, client, server, "2024-01-01T11:00:00")
            .await
            .unwrap();

        assert_eq!(repo.count(EventKind::Login).await.unwrap(), 2);
        assert_eq!(repo.count(EventKind::Logoff).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn dangling_references_are_rejected() {
        let store = temp_store("events-fk").await;
        let repo = EventRepository::new(store.conn.clone());

        let result = repo
            .insert(EventKind::Login, None, 41, 42, "2024-01-01T10:00:00")
            .await;

        assert!(result.is_err());
        assert_eq!(repo.count(EventKind::Login).await.unwrap(), 0);
    }
}
