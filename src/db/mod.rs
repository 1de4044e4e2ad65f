use crate::config::DatabaseConfig;
use crate::domain::{EntityKind, EventKind};
use anyhow::Result;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, SqlErr, Statement,
};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::directory::ResolveContention;
pub use repositories::sessions::{LatestStateRow, SessionRow};
pub use repositories::tokens::{InsertOutcome, TokenRecord};
pub use repositories::usage::UsageRow;

/// Default number of lookup/insert rounds for get-or-create.
pub const DEFAULT_RESOLVE_ATTEMPTS: u32 = 3;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,

    resolve_max_attempts: u32,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn from_config(config: &DatabaseConfig) -> Result<Self> {
        let mut store =
            Self::with_pool_options(&config.url, config.max_connections, config.min_connections)
                .await?;
        store.resolve_max_attempts = config.resolve_max_attempts.max(1);
        Ok(store)
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite://").trim_start_matches("sqlite:");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent()
                && !parent.as_os_str().is_empty()
            {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & schema ensured (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self {
            conn,
            resolve_max_attempts: DEFAULT_RESOLVE_ATTEMPTS,
        })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn directory_repo(&self) -> repositories::directory::DirectoryRepository {
        repositories::directory::DirectoryRepository::new(
            self.conn.clone(),
            self.resolve_max_attempts,
        )
    }

    fn event_repo(&self) -> repositories::events::EventRepository {
        repositories::events::EventRepository::new(self.conn.clone())
    }

    fn session_repo(&self) -> repositories::sessions::SessionRepository {
        repositories::sessions::SessionRepository::new(self.conn.clone())
    }

    fn usage_repo(&self) -> repositories::usage::UsageRepository {
        repositories::usage::UsageRepository::new(self.conn.clone())
    }

    fn token_repo(&self) -> repositories::tokens::TokenRepository {
        repositories::tokens::TokenRepository::new(self.conn.clone())
    }

    pub async fn resolve(&self, kind: EntityKind, key: &str) -> Result<i32> {
        self.directory_repo().resolve(kind, key).await
    }

    pub async fn count_entities(&self, kind: EntityKind) -> Result<u64> {
        self.directory_repo().count(kind).await
    }

    pub async fn insert_event(
        &self,
        kind: EventKind,
        user_id: Option<i32>,
        client_id: i32,
        server_id: i32,
        timestamp: &str,
    ) -> Result<()> {
        self.event_repo()
            .insert(kind, user_id, client_id, server_id, timestamp)
            .await
    }

    pub async fn count_events(&self, kind: EventKind) -> Result<u64> {
        self.event_repo().count(kind).await
    }

    pub async fn closed_sessions(&self) -> Result<Vec<SessionRow>> {
        self.session_repo().closed_sessions().await
    }

    pub async fn latest_state(&self) -> Result<Vec<LatestStateRow>> {
        self.session_repo().latest_state().await
    }

    pub async fn client_usage(&self) -> Result<Vec<UsageRow>> {
        self.usage_repo().client_usage().await
    }

    pub async fn server_usage(&self) -> Result<Vec<UsageRow>> {
        self.usage_repo().server_usage().await
    }

    pub async fn insert_token(&self, email: &str, token: &str) -> Result<InsertOutcome> {
        self.token_repo().insert(email, token).await
    }

    pub async fn get_token(&self, token: &str) -> Result<Option<TokenRecord>> {
        self.token_repo().get_by_token(token).await
    }
}

/// True when the storage engine rejected a write because of a unique index.
pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::Store;

    /// A fresh file-backed store; file-backed so that pooled connections share it.
    pub async fn temp_store(label: &str) -> Store {
        let db_path = std::env::temp_dir().join(format!(
            "logon-api-{label}-{}.db",
            uuid::Uuid::new_v4()
        ));
        Store::new(&format!("sqlite:{}", db_path.display()))
            .await
            .expect("failed to open temp store")
    }
}
