pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

/// 送出請求時使用的客戶端簽章，也用來產生匿名使用者代號
pub const CLIENT_SIGNATURE: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::RestStore;
pub use config::{StoreSettings, TomlConfig};
pub use crate::core::{catalog::Catalog, catalog::CatalogState, view::CatalogView};
pub use domain::model::{Phase, SortKey, Tool};
pub use utils::error::{CatalogError, Result};
