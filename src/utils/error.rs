use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("HTTP request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Store responded with {status}: {message}")]
    StoreError { status: u16, message: String },

    #[error("Failed to load {collection}: {message}")]
    FetchError { collection: String, message: String },

    #[error("Failed to submit rating for tool {tool_id}: {message}")]
    SubmissionError { tool_id: String, message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

/// 錯誤分類，決定嚴重程度、復原建議與顯示給使用者的訊息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Fetch,
    Submission,
    Network,
    Validation,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CatalogError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CatalogError::MissingConfigError { .. }
            | CatalogError::InvalidConfigValueError { .. }
            | CatalogError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            CatalogError::FetchError { .. } => ErrorCategory::Fetch,
            CatalogError::SubmissionError { .. } => ErrorCategory::Submission,
            // 資料庫回傳了無法解析的內容也歸為連線問題
            CatalogError::ApiError(_)
            | CatalogError::StoreError { .. }
            | CatalogError::SerializationError(_) => ErrorCategory::Network,
            CatalogError::ValidationError { .. } => ErrorCategory::Validation,
            CatalogError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 缺少設定時不可繼續執行
            ErrorCategory::Configuration => ErrorSeverity::Critical,
            ErrorCategory::Fetch | ErrorCategory::Submission | ErrorCategory::Network => {
                ErrorSeverity::Medium
            }
            ErrorCategory::Validation => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Set CATALOG_STORE_URL and CATALOG_STORE_KEY, or pass --store-url/--store-key or a --config file"
            }
            ErrorCategory::Fetch | ErrorCategory::Network => {
                "Check the store URL and key, then run the command again to refetch the catalog"
            }
            ErrorCategory::Submission => "Submit the rating again",
            ErrorCategory::Validation => "Ratings must be a whole number between 1 and 5",
            ErrorCategory::System => "Check file permissions and paths",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Fetch | ErrorCategory::Network => {
                format!("Unable to load AI tools: {}", self)
            }
            // 提交失敗只對使用者顯示通用訊息，細節留在日誌
            ErrorCategory::Submission => "Could not save your rating. Please try again.".to_string(),
            ErrorCategory::Validation => format!("Invalid input: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_is_critical() {
        let err = CatalogError::MissingConfigError {
            field: "store.url".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.to_string().contains("store.url"));
    }

    #[test]
    fn test_fetch_error_is_recoverable() {
        let err = CatalogError::FetchError {
            collection: "ratings".to_string(),
            message: "connection refused".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Fetch);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert_eq!(
            err.to_string(),
            "Failed to load ratings: connection refused"
        );
    }

    #[test]
    fn test_submission_message_hides_details() {
        let err = CatalogError::SubmissionError {
            tool_id: "t1".to_string(),
            message: "duplicate key value violates unique constraint".to_string(),
        };
        assert!(!err.user_friendly_message().contains("duplicate"));
    }

    #[test]
    fn test_undecodable_store_body_is_network_error() {
        let err: CatalogError = serde_json::from_str::<Vec<u8>>("{").unwrap_err().into();
        assert_eq!(err.category(), ErrorCategory::Network);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
    }

    #[test]
    fn test_out_of_range_rating_is_input_error() {
        let err = CatalogError::ValidationError {
            message: "rating must be between 1 and 5, got 9".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.user_friendly_message().contains("got 9"));
    }
}
