// Store and query configuration entities

use std::time::Duration;

use crate::entities::event::DEFAULT_TABLE_NAME;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

/// Everything needed to open a client handle to the table store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub endpoint_url: Option<String>,
    pub region: String,
    pub credentials: Option<StaticCredentials>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryConfig {
    pub table_name: String,
    pub page_size: Option<u32>,
    pub scan_timeout: Option<Duration>,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            table_name: DEFAULT_TABLE_NAME.to_string(),
            page_size: None,
            scan_timeout: None,
        }
    }
}
