use std::sync::Arc;

use events_domain::ports::TableScanner;
use events_domain::QueryConfig;

use crate::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub config: QueryConfig,
    pub scanner: Arc<dyn TableScanner>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(config: QueryConfig, scanner: Arc<dyn TableScanner>) -> Self {
        Self {
            config,
            scanner,
            metrics: Arc::new(Metrics::default()),
        }
    }
}
