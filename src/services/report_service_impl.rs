//! `SeaORM` implementation of the `ReportService` trait.

use async_trait::async_trait;

use crate::db::{LatestStateRow, SessionRow, Store};
use crate::services::report_service::{ReportError, ReportService, UsageReport};

pub struct SeaOrmReportService {
    store: Store,
}

impl SeaOrmReportService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ReportService for SeaOrmReportService {
    async fn closed_sessions(&self) -> Result<Vec<SessionRow>, ReportError> {
        Ok(self.store.closed_sessions().await?)
    }

    async fn latest_state(&self) -> Result<Vec<LatestStateRow>, ReportError> {
        Ok(self.store.latest_state().await?)
    }

    async fn usage(&self) -> Result<UsageReport, ReportError> {
        let clients = self.store.client_usage().await?;
        let servers = self.store.server_usage().await?;
        Ok(UsageReport { clients, servers })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::temp_store;
    use crate::domain::{EventKind, SessionEvent};
    use crate::services::{EventService, SeaOrmEventService};

    #[tokio::test]
    async fn usage_counts_match_recorded_logins() {
        let store = temp_store("report-usage").await;
        let events = SeaOrmEventService::new(store.clone());
        let reports = SeaOrmReportService::new(store);

        for (client, server) in [("c1", "s1"), ("c2", "s1"), ("c1", "s2"), ("c1", "s1")] {
            let event = SessionEvent {
                username: None,
                client: client.to_string(),
                server: server.to_string(),
                timestamp: "2024-01-01T10:00:00".to_string(),
            };
            events.record(EventKind::Login, &event).await.unwrap();
        }

        let usage = reports.usage().await.unwrap();

        assert_eq!(usage.clients[0].name, "c1");
        assert_eq!(usage.clients[0].count, 3);
        assert_eq!(usage.servers[0].name, "s1");
        assert_eq!(usage.servers[0].count, 3);
        let total: i64 = usage.clients.iter().map(|row| row.count).sum();
        assert_eq!(total, 4);
        assert!(usage.clients.windows(2).all(|w| w[0].count >= w[1].count));
    }
}
