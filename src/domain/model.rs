use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::error::CatalogError;

/// 產品開發階段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Discovery,
    Delivery,
    Iteration,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Discovery => "discovery",
            Phase::Delivery => "delivery",
            Phase::Iteration => "iteration",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Phase::Discovery => "🔍",
            Phase::Delivery => "🚀",
            Phase::Iteration => "🔄",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "discovery" => Ok(Phase::Discovery),
            "delivery" => Ok(Phase::Delivery),
            "iteration" => Ok(Phase::Iteration),
            other => Err(CatalogError::ValidationError {
                message: format!(
                    "unknown phase '{}', expected one of discovery, delivery, iteration",
                    other
                ),
            }),
        }
    }
}

/// 排序方式，預設依名稱排序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Name,
    Rating,
    Phase,
}

impl FromStr for SortKey {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "name" => Ok(SortKey::Name),
            "rating" => Ok(SortKey::Rating),
            "phase" => Ok(SortKey::Phase),
            other => Err(CatalogError::ValidationError {
                message: format!("unknown sort key '{}', expected name, rating or phase", other),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    pub description: String,
    pub use_case: String,
    pub phase: Phase,
    pub link: String,
    #[serde(default)]
    pub context_window: Option<String>,
    #[serde(default)]
    pub free_limit: Option<String>,
    pub created_at: DateTime<Utc>,
    /// 由評分計算而來，不會寫回資料庫
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
}

impl Tool {
    /// 沒有評分時視為 0
    pub fn rating_or_zero(&self) -> f64 {
        self.average_rating.unwrap_or(0.0)
    }
}

/// 評分紀錄；計算平均只需要 tool_id 與 rating，其餘欄位可能不在查詢結果中
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    #[serde(default)]
    pub id: Option<String>,
    pub tool_id: String,
    pub rating: u8,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// 寫入 ratings 集合的欄位，其餘欄位由資料庫產生
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRating {
    pub tool_id: String,
    pub rating: u8,
    pub user_id: String,
}
