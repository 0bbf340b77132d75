use crate::domain::model::NewRating;
use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::validate_range;
use chrono::{DateTime, Utc};

pub const MIN_STARS: u8 = 1;
pub const MAX_STARS: u8 = 5;

const SIGNATURE_PREFIX_LEN: usize = 20;

/// 1 到 5 的星等
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Stars(u8);

impl Stars {
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Stars {
    type Error = CatalogError;

    fn try_from(value: i64) -> Result<Self> {
        validate_range("rating", value, i64::from(MIN_STARS), i64::from(MAX_STARS)).map_err(
            |_| CatalogError::ValidationError {
                message: format!(
                    "rating must be between {} and {}, got {}",
                    MIN_STARS, MAX_STARS, value
                ),
            },
        )?;
        Ok(Stars(value as u8))
    }
}

/// 匿名使用者代號：`user_<客戶端簽章前 20 字元>_<毫秒時間戳>`
///
/// 這不是身分驗證，只是每次提交產生的臨時標記，同一毫秒內可能重複。
pub fn anonymous_user_id(client_signature: &str, now: DateTime<Utc>) -> String {
    let prefix: String = client_signature.chars().take(SIGNATURE_PREFIX_LEN).collect();
    format!("user_{}_{}", prefix, now.timestamp_millis())
}

/// 組出要寫入的評分紀錄
pub fn build_submission(
    tool_id: &str,
    stars: Stars,
    client_signature: &str,
    now: DateTime<Utc>,
) -> NewRating {
    NewRating {
        tool_id: tool_id.to_string(),
        rating: stars.value(),
        user_id: anonymous_user_id(client_signature, now),
    }
}
