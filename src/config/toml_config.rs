use crate::domain::model::{Phase, SortKey};
use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub store: StoreSection,
    #[serde(default)]
    pub display: DisplaySection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreSection {
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub tools_table: Option<String>,
    pub ratings_table: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplaySection {
    pub default_phase: Option<Phase>,
    pub default_sort: Option<SortKey>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CatalogError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CatalogError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CATALOG_STORE_KEY})，未設定的變數換成空字串
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CatalogError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| {
                tracing::warn!("Environment variable {} is not set", var_name);
                String::new()
            })
        });

        Ok(result.to_string())
    }

    /// 空字串視為未設定
    pub fn store_url(&self) -> Option<&str> {
        non_blank(self.store.url.as_deref())
    }

    pub fn api_key(&self) -> Option<&str> {
        non_blank(self.store.api_key.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

impl Validate for TomlConfig {
    /// 只驗證檔案中有填的欄位；必填檢查在合併 CLI 參數之後
    fn validate(&self) -> Result<()> {
        if let Some(url) = self.store_url() {
            validate_url("store.url", url)?;
        }
        if let Some(table) = &self.store.tools_table {
            validate_non_empty_string("store.tools_table", table)?;
        }
        if let Some(table) = &self.store.ratings_table {
            validate_non_empty_string("store.ratings_table", table)?;
        }
        if let Some(timeout) = self.store.timeout_seconds {
            validate_range("store.timeout_seconds", timeout, 1, 600)?;
        }
        Ok(())
    }
}
