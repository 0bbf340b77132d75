use crate::domain::model::{NewRating, Phase, Rating, Tool};
use crate::domain::ports::CatalogStore;
use crate::utils::error::{CatalogError, Result};
use chrono::{TimeZone, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;

pub fn tool(id: &str, name: &str, phase: Phase) -> Tool {
    Tool {
        id: id.to_string(),
        name: name.to_string(),
        logo_url: None,
        description: format!("{} description", name),
        use_case: format!("{} use case", name),
        phase,
        link: format!("https://{}.example.com", id),
        context_window: None,
        free_limit: None,
        created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        average_rating: None,
    }
}

pub fn rated(id: &str, name: &str, phase: Phase, average: f64) -> Tool {
    Tool {
        average_rating: Some(average),
        ..tool(id, name, phase)
    }
}

pub fn rating(tool_id: &str, value: u8) -> Rating {
    Rating {
        id: Some(format!("{}-{}", tool_id, value)),
        tool_id: tool_id.to_string(),
        rating: value,
        user_id: Some("user_test".to_string()),
        created_at: Some(Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap()),
    }
}

#[derive(Default)]
struct MockState {
    tools: Vec<Tool>,
    ratings: Vec<Rating>,
    inserted: Vec<NewRating>,
    fail_tools: bool,
    fail_ratings: bool,
    fail_insert: bool,
}

/// 記憶體內的資料庫，插入的評分會出現在後續的 list_ratings
#[derive(Clone)]
pub struct MockStore {
    state: Arc<Mutex<MockState>>,
}

impl MockStore {
    pub fn new(tools: Vec<Tool>, ratings: Vec<Rating>) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                tools,
                ratings,
                ..Default::default()
            })),
        }
    }

    pub async fn fail_tools(&self, fail: bool) {
        self.state.lock().await.fail_tools = fail;
    }

    pub async fn fail_ratings(&self, fail: bool) {
        self.state.lock().await.fail_ratings = fail;
    }

    pub async fn fail_insert(&self, fail: bool) {
        self.state.lock().await.fail_insert = fail;
    }

    pub async fn inserted(&self) -> Vec<NewRating> {
        self.state.lock().await.inserted.clone()
    }
}

#[async_trait::async_trait]
impl CatalogStore for MockStore {
    async fn list_tools(&self) -> Result<Vec<Tool>> {
        let state = self.state.lock().await;
        if state.fail_tools {
            return Err(CatalogError::StoreError {
                status: 500,
                message: "tools unavailable".to_string(),
            });
        }
        Ok(state.tools.clone())
    }

    async fn list_ratings(&self) -> Result<Vec<Rating>> {
        let state = self.state.lock().await;
        if state.fail_ratings {
            return Err(CatalogError::StoreError {
                status: 500,
                message: "ratings unavailable".to_string(),
            });
        }
        Ok(state.ratings.clone())
    }

    async fn insert_rating(&self, new_rating: &NewRating) -> Result<()> {
        let mut state = self.state.lock().await;
        if state.fail_insert {
            return Err(CatalogError::StoreError {
                status: 409,
                message: "insert rejected".to_string(),
            });
        }

        let mut stored = rating(&new_rating.tool_id, new_rating.rating);
        stored.id = Some(format!("inserted-{}", state.inserted.len()));
        stored.user_id = Some(new_rating.user_id.clone());
        state.ratings.push(stored);
        state.inserted.push(new_rating.clone());
        Ok(())
    }
}
