use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use events_domain::{QueryConfig, StaticCredentials, StoreConfig, DEFAULT_TABLE_NAME};

use crate::config::validation::{validate_region, validate_table_name};

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub endpoint_url: Option<String>,
    pub region: String,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub session_token: Option<String>,
    pub table_name: String,
    pub page_size: Option<u32>,
    pub scan_timeout_seconds: Option<u64>,
}

impl Default for AppConfig {
    // Local emulator defaults.
    fn default() -> Self {
        Self {
            endpoint_url: Some("http://localhost:8000".to_string()),
            region: "DEFAULT_REGION".to_string(),
            access_key_id: Some("FOO".to_string()),
            secret_access_key: Some("BAR".to_string()),
            session_token: None,
            table_name: DEFAULT_TABLE_NAME.to_string(),
            page_size: None,
            scan_timeout_seconds: None,
        }
    }
}

impl AppConfig {
    /// Loads `path`, else `$EVENTS_CONFIG`, else `./config.toml`. A missing
    /// file means defaults. Environment overrides apply on top either way.
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with(path, |key| env::var(key).ok()).await
    }

    async fn load_with(
        path: Option<&Path>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let file_path = match path {
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(
                lookup("EVENTS_CONFIG").unwrap_or_else(|| "./config.toml".to_string()),
            ),
        };

        let mut config = if file_path.exists() {
            let content = fs::read_to_string(&file_path).await?;
            Self::from_toml(&content)?
        } else {
            warn!("{} not found, using defaults", file_path.display());
            AppConfig::default()
        };
        config.apply_overrides(lookup);
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|err| anyhow!("invalid config: {}", err))
    }

    pub fn normalize(&mut self) {
        for value in [
            &mut self.endpoint_url,
            &mut self.access_key_id,
            &mut self.secret_access_key,
            &mut self.session_token,
        ] {
            if value.as_deref().is_some_and(|text| text.trim().is_empty()) {
                *value = None;
            }
        }
        self.region = self.region.trim().to_string();
        self.table_name = self.table_name.trim().to_string();
    }

    pub fn validate(&self) -> Result<()> {
        validate_region(&self.region)?;
        validate_table_name(&self.table_name)?;
        if self.access_key_id.is_some() != self.secret_access_key.is_some() {
            return Err(anyhow!(
                "access_key_id and secret_access_key must be set together"
            ));
        }
        if self.session_token.is_some() && self.access_key_id.is_none() {
            return Err(anyhow!("session_token requires access_key_id"));
        }
        if self.page_size == Some(0) {
            return Err(anyhow!("page_size must be greater than 0"));
        }
        if self.scan_timeout_seconds == Some(0) {
            return Err(anyhow!("scan_timeout_seconds must be greater than 0"));
        }
        Ok(())
    }

    pub fn to_store_config(&self) -> StoreConfig {
        let credentials = match (&self.access_key_id, &self.secret_access_key) {
            (Some(access_key_id), Some(secret_access_key)) => Some(StaticCredentials {
                access_key_id: access_key_id.clone(),
                secret_access_key: secret_access_key.clone(),
                session_token: self.session_token.clone(),
            }),
            _ => None,
        };
        StoreConfig {
            endpoint_url: self.endpoint_url.clone(),
            region: self.region.clone(),
            credentials,
        }
    }

    pub fn to_query_config(&self) -> QueryConfig {
        QueryConfig {
            table_name: self.table_name.clone(),
            page_size: self.page_size,
            scan_timeout: self.scan_timeout_seconds.map(Duration::from_secs),
        }
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup("EVENTS_ENDPOINT_URL") {
            self.endpoint_url = Some(value);
        }
        if let Some(value) = lookup("EVENTS_REGION") {
            self.region = value;
        }
        if let Some(value) = lookup("EVENTS_ACCESS_KEY_ID") {
            self.access_key_id = Some(value);
        }
        if let Some(value) = lookup("EVENTS_SECRET_ACCESS_KEY") {
            self.secret_access_key = Some(value);
        }
        if let Some(value) = lookup("EVENTS_SESSION_TOKEN") {
            self.session_token = Some(value);
        }
        if let Some(value) = lookup("EVENTS_TABLE_NAME") {
            self.table_name = value;
        }
        if let Some(value) = lookup("EVENTS_PAGE_SIZE") {
            self.page_size = value.parse().ok().or(self.page_size);
        }
        if let Some(value) = lookup("EVENTS_SCAN_TIMEOUT_SECONDS") {
            self.scan_timeout_seconds = value.parse().ok().or(self.scan_timeout_seconds);
        }
    }
}
