use crate::domain::model::{NewRating, Rating, Tool};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// 外部資料庫的查詢與寫入介面
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// 所有工具，依名稱遞增排序
    async fn list_tools(&self) -> Result<Vec<Tool>>;
    /// 所有評分，不保證順序
    async fn list_ratings(&self) -> Result<Vec<Rating>>;
    async fn insert_rating(&self, rating: &NewRating) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn store_url(&self) -> &str;
    fn api_key(&self) -> &str;
    fn tools_table(&self) -> &str;
    fn ratings_table(&self) -> &str;
    fn request_timeout(&self) -> Option<Duration>;
}
