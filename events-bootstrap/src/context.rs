use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use events_application::AppState;
use events_infrastructure::{connect, AppConfig, DynamoTableScanner};

pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    pub async fn new(config_path: Option<&Path>) -> Result<Self> {
        let config = AppConfig::load(config_path).await?;
        let client = connect(&config.to_store_config()).await;
        let scanner = Arc::new(DynamoTableScanner::new(client));

        Ok(Self {
            state: AppState::new(config.to_query_config(), scanner),
        })
    }
}
