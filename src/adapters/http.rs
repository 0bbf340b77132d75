use crate::domain::model::{NewRating, Rating, Tool};
use crate::domain::ports::{CatalogStore, ConfigProvider};
use crate::utils::error::{CatalogError, Result};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

/// PostgREST (Supabase) 風格的 REST 資料庫客戶端
#[derive(Debug, Clone)]
pub struct RestStore {
    client: Client,
    base_url: String,
    api_key: String,
    tools_table: String,
    ratings_table: String,
}

impl RestStore {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        let mut builder = Client::builder().user_agent(crate::CLIENT_SIGNATURE);
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.store_url().trim_end_matches('/').to_string(),
            api_key: config.api_key().to_string(),
            tools_table: config.tools_table().to_string(),
            ratings_table: config.ratings_table().to_string(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// 非 2xx 回應轉成 StoreError，優先使用資料庫回傳的 message 欄位
    async fn ensure_success(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|value| {
                value
                    .get("message")
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            })
            .unwrap_or(body);

        Err(CatalogError::StoreError {
            status: status.as_u16(),
            message,
        })
    }

    /// 解析 JSON 回應；失敗時保留 serde 的欄位與位置資訊
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let body = Self::ensure_success(response).await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait::async_trait]
impl CatalogStore for RestStore {
    async fn list_tools(&self) -> Result<Vec<Tool>> {
        let url = self.table_url(&self.tools_table);
        tracing::debug!("Fetching tools from: {}", url);

        let response = self
            .authorized(self.client.get(&url))
            .query(&[("select", "*"), ("order", "name.asc")])
            .send()
            .await?;
        tracing::debug!("Tools response status: {}", response.status());

        let tools: Vec<Tool> = Self::decode(response).await?;
        Ok(tools)
    }

    async fn list_ratings(&self) -> Result<Vec<Rating>> {
        let url = self.table_url(&self.ratings_table);
        tracing::debug!("Fetching ratings from: {}", url);

        let response = self
            .authorized(self.client.get(&url))
            .query(&[("select", "tool_id,rating")])
            .send()
            .await?;
        tracing::debug!("Ratings response status: {}", response.status());

        let ratings: Vec<Rating> = Self::decode(response).await?;
        Ok(ratings)
    }

    async fn insert_rating(&self, rating: &NewRating) -> Result<()> {
        let url = self.table_url(&self.ratings_table);
        tracing::debug!("Inserting rating {} for tool {}", rating.rating, rating.tool_id);

        let response = self
            .authorized(self.client.post(&url))
            .header("Prefer", "return=minimal")
            .json(&[rating])
            .send()
            .await?;
        tracing::debug!("Insert response status: {}", response.status());

        Self::ensure_success(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use std::time::Duration;

    struct MockConfig {
        store_url: String,
        api_key: String,
    }

    impl MockConfig {
        fn new(store_url: String) -> Self {
            Self {
                store_url,
                api_key: "anon-key".to_string(),
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn store_url(&self) -> &str {
            &self.store_url
        }

        fn api_key(&self) -> &str {
            &self.api_key
        }

        fn tools_table(&self) -> &str {
            "ai_tools"
        }

        fn ratings_table(&self) -> &str {
            "ratings"
        }

        fn request_timeout(&self) -> Option<Duration> {
            Some(Duration::from_secs(5))
        }
    }

    #[tokio::test]
    async fn test_list_tools_sends_order_and_auth_headers() {
        let server = MockServer::start();
        let tools_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/rest/v1/ai_tools")
                .query_param("select", "*")
                .query_param("order", "name.asc")
                .header("apikey", "anon-key")
                .header("Authorization", "Bearer anon-key");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([
                    {
                        "id": "a", "name": "Claude", "description": "Assistant",
                        "use_case": "Synthesis", "phase": "discovery",
                        "link": "https://claude.ai", "context_window": "200k",
                        "free_limit": null, "logo_url": null,
                        "created_at": "2025-01-01T00:00:00+00:00"
                    }
                ]));
        });

        // 結尾斜線不應產生雙斜線路徑
        let store = RestStore::new(&MockConfig::new(format!("{}/", server.base_url()))).unwrap();
        let tools = store.list_tools().await.unwrap();

        tools_mock.assert();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "Claude");
        assert_eq!(tools[0].average_rating, None);
    }

    #[tokio::test]
    async fn test_list_ratings() {
        let server = MockServer::start();
        let ratings_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/rest/v1/ratings")
                .query_param("select", "tool_id,rating");
            then.status(200).json_body(serde_json::json!([
                {"id": "r1", "tool_id": "a", "rating": 4, "user_id": "u1", "created_at": "2025-01-02T00:00:00Z"},
                {"id": "r2", "tool_id": "a", "rating": 5, "user_id": "u2", "created_at": "2025-01-03T00:00:00Z"}
            ]));
        });

        let store = RestStore::new(&MockConfig::new(server.base_url())).unwrap();
        let ratings = store.list_ratings().await.unwrap();

        ratings_mock.assert();
        assert_eq!(ratings.iter().map(|r| r.rating).collect::<Vec<_>>(), vec![4, 5]);
    }

    #[tokio::test]
    async fn test_list_ratings_tolerates_null_and_extra_fields() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/rest/v1/ratings");
            then.status(200).json_body(serde_json::json!([
                {"tool_id": "a", "rating": 4, "user_id": "u"},
                {"tool_id": "a", "rating": 5, "user_id": null, "created_at": null, "note": "legacy"}
            ]));
        });

        let store = RestStore::new(&MockConfig::new(server.base_url())).unwrap();
        let ratings = store.list_ratings().await.unwrap();

        assert_eq!(ratings.len(), 2);
        assert_eq!(ratings[1].user_id, None);
    }

    #[tokio::test]
    async fn test_malformed_body_is_serialization_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/rest/v1/ai_tools");
            then.status(200).json_body(serde_json::json!([{"id": "a", "name": "NoPhase"}]));
        });

        let store = RestStore::new(&MockConfig::new(server.base_url())).unwrap();
        let err = store.list_tools().await.unwrap_err();
        assert!(matches!(err, CatalogError::SerializationError(_)));
        assert!(err.to_string().contains("missing field"));
    }

    #[tokio::test]
    async fn test_insert_rating_posts_single_record_array() {
        let server = MockServer::start();
        let insert_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/rest/v1/ratings")
                .header("Prefer", "return=minimal")
                .json_body(serde_json::json!([
                    {"tool_id": "a", "rating": 5, "user_id": "user_x_1"}
                ]));
            then.status(201);
        });

        let store = RestStore::new(&MockConfig::new(server.base_url())).unwrap();
        let rating = NewRating {
            tool_id: "a".to_string(),
            rating: 5,
            user_id: "user_x_1".to_string(),
        };
        store.insert_rating(&rating).await.unwrap();

        insert_mock.assert();
    }

    #[tokio::test]
    async fn test_store_error_uses_message_field() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/rest/v1/ai_tools");
            then.status(401)
                .json_body(serde_json::json!({"message": "Invalid API key", "hint": null}));
        });

        let store = RestStore::new(&MockConfig::new(server.base_url())).unwrap();
        match store.list_tools().await {
            Err(CatalogError::StoreError { status, message }) => {
                assert_eq!(status, 401);
                assert_eq!(message, "Invalid API key");
            }
            other => panic!("expected store error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_store_error_falls_back_to_body_text() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/rest/v1/ratings");
            then.status(503).body("upstream unavailable");
        });

        let store = RestStore::new(&MockConfig::new(server.base_url())).unwrap();
        let rating = NewRating {
            tool_id: "a".to_string(),
            rating: 3,
            user_id: "u".to_string(),
        };
        let err = store.insert_rating(&rating).await.unwrap_err();
        assert_eq!(err.to_string(), "Store responded with 503: upstream unavailable");
    }
}
