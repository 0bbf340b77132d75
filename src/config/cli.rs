use crate::config::settings::{StoreSettings, DEFAULT_RATINGS_TABLE, DEFAULT_TOOLS_TABLE};
use crate::config::toml_config::TomlConfig;
use crate::domain::model::{Phase, SortKey};
use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "ai-tool-catalog")]
#[command(about = "Browse and rate AI tools for every stage of product development")]
pub struct CliConfig {
    /// Base URL of the hosted store
    #[arg(long, env = "CATALOG_STORE_URL", global = true)]
    pub store_url: Option<String>,

    /// API key sent with every store request
    #[arg(long, env = "CATALOG_STORE_KEY", hide_env_values = true, global = true)]
    pub store_key: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List tools, optionally filtered by phase
    List {
        /// discovery, delivery or iteration (all phases when omitted)
        #[arg(long)]
        phase: Option<Phase>,

        /// name, rating or phase
        #[arg(long)]
        sort: Option<SortKey>,
    },
    /// Show the details of one tool
    Show {
        /// Tool id or name
        tool: String,
    },
    /// Rate a tool from 1 to 5 stars
    Rate {
        /// Tool id or name
        tool: String,
        stars: i64,
    },
}

impl CliConfig {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::List {
            phase: None,
            sort: None,
        })
    }

    /// 讀取 --config 指定的檔案（如果有）
    pub fn load_file(&self) -> Result<Option<TomlConfig>> {
        match &self.config {
            Some(path) => {
                tracing::debug!("Loading configuration from: {}", path);
                let file = TomlConfig::from_file(path)?;
                file.validate()?;
                Ok(Some(file))
            }
            None => Ok(None),
        }
    }

    /// 合併 CLI 參數與設定檔；CLI（含環境變數）優先
    pub fn resolve_store(&self, file: Option<&TomlConfig>) -> Result<StoreSettings> {
        let url = self
            .store_url
            .as_deref()
            .filter(|v| !v.trim().is_empty())
            .or_else(|| file.and_then(TomlConfig::store_url))
            .ok_or_else(|| CatalogError::MissingConfigError {
                field: "store.url (CATALOG_STORE_URL)".to_string(),
            })?;
        let api_key = self
            .store_key
            .as_deref()
            .filter(|v| !v.trim().is_empty())
            .or_else(|| file.and_then(TomlConfig::api_key))
            .ok_or_else(|| CatalogError::MissingConfigError {
                field: "store.api_key (CATALOG_STORE_KEY)".to_string(),
            })?;

        let store = file.map(|f| f.store.clone()).unwrap_or_default();
        let settings = StoreSettings {
            url: url.to_string(),
            api_key: api_key.to_string(),
            tools_table: store
                .tools_table
                .unwrap_or_else(|| DEFAULT_TOOLS_TABLE.to_string()),
            ratings_table: store
                .ratings_table
                .unwrap_or_else(|| DEFAULT_RATINGS_TABLE.to_string()),
            timeout_seconds: store.timeout_seconds,
        };
        settings.validate()?;
        Ok(settings)
    }
}
