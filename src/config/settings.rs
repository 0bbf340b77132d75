use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_url, Validate,
};
use std::time::Duration;

pub const DEFAULT_TOOLS_TABLE: &str = "ai_tools";
pub const DEFAULT_RATINGS_TABLE: &str = "ratings";

/// 連線資料庫所需的最終設定（CLI 與 TOML 合併後）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSettings {
    pub url: String,
    pub api_key: String,
    pub tools_table: String,
    pub ratings_table: String,
    pub timeout_seconds: Option<u64>,
}

impl StoreSettings {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            tools_table: DEFAULT_TOOLS_TABLE.to_string(),
            ratings_table: DEFAULT_RATINGS_TABLE.to_string(),
            timeout_seconds: None,
        }
    }
}

impl Validate for StoreSettings {
    fn validate(&self) -> Result<()> {
        validate_url("store.url", &self.url)?;
        validate_non_empty_string("store.api_key", &self.api_key)?;
        validate_non_empty_string("store.tools_table", &self.tools_table)?;
        validate_non_empty_string("store.ratings_table", &self.ratings_table)?;
        if let Some(timeout) = self.timeout_seconds {
            validate_range("store.timeout_seconds", timeout, 1, 600)?;
        }
        Ok(())
    }
}

impl ConfigProvider for StoreSettings {
    fn store_url(&self) -> &str {
        &self.url
    }

    fn api_key(&self) -> &str {
        &self.api_key
    }

    fn tools_table(&self) -> &str {
        &self.tools_table
    }

    fn ratings_table(&self) -> &str {
        &self.ratings_table
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}
