use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    EventService, ReportService, SeaOrmEventService, SeaOrmReportService, SeaOrmTokenService,
    TokenService,
};

/// Everything a request handler or CLI command needs, built once at startup.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub event_service: Arc<dyn EventService>,

    pub report_service: Arc<dyn ReportService>,

    pub token_service: Arc<dyn TokenService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::from_config(&config.database).await?;
        Ok(Self::with_store(config, store))
    }

    #[must_use]
    pub fn with_store(config: Config, store: Store) -> Self {
        let event_service: Arc<dyn EventService> = Arc::new(SeaOrmEventService::new(store.clone()));
        let report_service: Arc<dyn ReportService> =
            Arc::new(SeaOrmReportService::new(store.clone()));
        let token_service: Arc<dyn TokenService> = Arc::new(SeaOrmTokenService::new(
            store.clone(),
            config.security.token_bytes,
        ));

        Self {
            config: Arc::new(config),
            store,
            event_service,
            report_service,
            token_service,
        }
    }
}
