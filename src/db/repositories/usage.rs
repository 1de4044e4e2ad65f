use crate::entities::{clients, logins, prelude::*, servers};
use anyhow::{Context, Result};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType, QueryOrder,
    QuerySelect, RelationTrait,
};
use serde::Serialize;

/// Number of logins recorded against one client or server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult)]
pub struct UsageRow {
    pub name: String,
    pub count: i64,
}

pub struct UsageRepository {
    conn: DatabaseConnection,
}

impl UsageRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Logins per client, busiest first. Ties fall back to name order.
    pub async fn client_usage(&self) -> Result<Vec<UsageRow>> {
        Logins::find()
            .select_only()
            .column_as(clients::Column::Name, "name")
            .column_as(logins::Column::Id.count(), "count")
            .join(JoinType::InnerJoin, logins::Relation::Clients.def())
            .group_by(clients::Column::Id)
            .group_by(clients::Column::Name)
            .order_by_desc(logins::Column::Id.count())
            .order_by_asc(clients::Column::Name)
            .into_model::<UsageRow>()
            .all(&self.conn)
            .await
            .context("Failed to aggregate client usage")
    }

    /// Logins per server, busiest first. Ties fall back to name order.
    pub async fn server_usage(&self) -> Result<Vec<UsageRow>> {
        Logins::find()
            .select_only()
            .column_as(servers::Column::Name, "name")
            .column_as(logins::Column::Id.count(), "count")
            .join(JoinType::InnerJoin, logins::Relation::Servers.def())
            .group_by(servers::Column::Id)
            .group_by(servers::Column::Name)
            .order_by_desc(logins::Column::Id.count())
            .order_by_asc(servers::Column::Name)
            .into_model::<UsageRow>()
            .all(&self.conn)
            .await
            .context("Failed to aggregate server usage")
    }
}

#[cfg(test)]
mod tests {
    use crate::db::test_support::temp_store;
    use crate::domain::{EntityKind, EventKind};

    #[tokio::test]
    async fn counts_logins_per_client_and_server() {
        let store = temp_store("usage").await;

        let events = [
            ("c1", "s1"),
            ("c1", "s2"),
            ("c1", "s2"),
            ("c2", "s2"),
            ("c3", "s1"),
            ("c3", "s1"),
        ];
        for (i, (client, server)) in events.iter().enumerate() {
            let client_id = store.resolve(EntityKind::Client, client).await.unwrap();
            let server_id = store.resolve(EntityKind::Server, server).await.unwrap();
            store
                .insert_event(
                    EventKind::Login,
                    None,
                    client_id,
                    server_id,
                    &format!("2024-01-01T10:00:0{i}"),
                )
                .await
                .unwrap();
        }
        // Logoffs and entities without logins are not usage.
        let idle = store.resolve(EntityKind::Client, "idle").await.unwrap();
        let s1 = store.resolve(EntityKind::Server, "s1").await.unwrap();
        store
            .insert_event(EventKind::Logoff, None, idle, s1, "2024-01-01T11:00:00")
            .await
            .unwrap();

        let clients: Vec<(String, i64)> = store
            .client_usage()
            .await
            .unwrap()
            .into_iter()
            .map(|row| (row.name, row.count))
            .collect();
        let servers: Vec<(String, i64)> = store
            .server_usage()
            .await
            .unwrap()
            .into_iter()
            .map(|row| (row.name, row.count))
            .collect();

        assert_eq!(
            clients,
            vec![
                ("c1".to_string(), 3),
                ("c3".to_string(), 2),
                ("c2".to_string(), 1),
            ]
        );
        assert_eq!(
            servers,
            vec![("s1".to_string(), 3), ("s2".to_string(), 3)]
        );
    }

    #[tokio::test]
    async fn empty_store_has_no_usage() {
        let store = temp_store("usage-empty").await;
        assert!(store.client_usage().await.unwrap().is_empty());
        assert!(store.server_usage().await.unwrap().is_empty());
    }
}
