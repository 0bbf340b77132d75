use crate::core::aggregator::fetch_catalog;
use crate::core::rating::{build_submission, Stars};
use crate::domain::model::Tool;
use crate::domain::ports::CatalogStore;
use crate::utils::error::{CatalogError, Result};
use chrono::Utc;
use tokio::sync::watch;

/// 前端看到的目錄狀態
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogState {
    pub tools: Vec<Tool>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for CatalogState {
    /// 第一次 refresh 完成前視為載入中
    fn default() -> Self {
        Self {
            tools: Vec::new(),
            loading: true,
            error: None,
        }
    }
}

/// 目錄狀態容器，唯一會寫入狀態的地方
///
/// 狀態透過 `watch` 通道發布，顯示層可以 `subscribe` 觀察 `loading`。
/// 同時觸發多次 `refresh` 時以最後完成者為準。
pub struct Catalog<S: CatalogStore> {
    store: S,
    state: watch::Sender<CatalogState>,
    client_signature: String,
}

impl<S: CatalogStore> Catalog<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            state: watch::Sender::new(CatalogState::default()),
            client_signature: crate::CLIENT_SIGNATURE.to_string(),
        }
    }

    pub fn with_client_signature(mut self, signature: impl Into<String>) -> Self {
        self.client_signature = signature.into();
        self
    }

    pub fn subscribe(&self) -> watch::Receiver<CatalogState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> CatalogState {
        self.state.borrow().clone()
    }

    pub fn tools(&self) -> Vec<Tool> {
        self.state.borrow().tools.clone()
    }

    pub fn loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    /// 依 id 或名稱（不分大小寫）找工具
    pub fn find_tool(&self, key: &str) -> Option<Tool> {
        let state = self.state.borrow();
        state
            .tools
            .iter()
            .find(|t| t.id == key)
            .or_else(|| {
                let wanted = key.to_lowercase();
                state.tools.iter().find(|t| t.name.to_lowercase() == wanted)
            })
            .cloned()
    }

    /// 重新抓取整份目錄並計算平均分數
    ///
    /// 失敗時保留上一次成功的工具清單並記錄錯誤；成功時清除錯誤。
    pub async fn refresh(&self) -> Result<()> {
        self.state.send_modify(|state| state.loading = true);

        match fetch_catalog(&self.store).await {
            Ok(tools) => {
                tracing::info!("✅ Loaded {} tools", tools.len());
                self.state.send_modify(|state| {
                    state.tools = tools;
                    state.loading = false;
                    state.error = None;
                });
                Ok(())
            }
            Err(e) => {
                tracing::error!("❌ Failed to load catalog: {}", e);
                let message = e.to_string();
                self.state.send_modify(|state| {
                    state.loading = false;
                    state.error = Some(message);
                });
                Err(e)
            }
        }
    }

    /// 錯誤已寫入狀態，呼叫端只需重新讀取
    pub async fn refetch(&self) {
        let _ = self.refresh().await;
    }

    /// 驗證並寫入一筆評分，不重新整理目錄
    pub async fn record_rating(&self, tool_id: &str, rating: i64) -> Result<()> {
        let stars = Stars::try_from(rating)?;
        let submission = build_submission(tool_id, stars, &self.client_signature, Utc::now());

        self.store
            .insert_rating(&submission)
            .await
            .map_err(|e| CatalogError::SubmissionError {
                tool_id: tool_id.to_string(),
                message: e.to_string(),
            })?;

        tracing::info!("⭐ Recorded rating {} for tool {}", stars.value(), tool_id);
        Ok(())
    }

    /// 寫入評分後重新整理，成功回傳 true
    pub async fn submit_rating(&self, tool_id: &str, rating: i64) -> bool {
        if let Err(e) = self.record_rating(tool_id, rating).await {
            tracing::error!("Error submitting rating: {}", e);
            return false;
        }

        if let Err(e) = self.refresh().await {
            tracing::warn!("Rating saved but catalog refresh failed: {}", e);
        }
        true
    }
}
