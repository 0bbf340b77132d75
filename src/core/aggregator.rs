use crate::domain::model::{Rating, Tool};
use crate::domain::ports::CatalogStore;
use crate::utils::error::{CatalogError, Result};
use std::collections::HashMap;

/// 平均分數，四捨五入到小數第一位；沒有評分時為 0
///
/// 以整數運算取到十分位，`.x5` 一律進位（例如 4.25 → 4.3），
/// 避免浮點誤差讓 17/4 之類的平均值落到 4.2。
pub fn average_rating(values: &[u8]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let sum: u64 = values.iter().map(|&v| u64::from(v)).sum();
    let count = values.len() as u64;
    let tenths = (20 * sum + count) / (2 * count);
    tenths as f64 / 10.0
}

/// 依 tool_id 分組評分
pub fn group_by_tool(ratings: &[Rating]) -> HashMap<&str, Vec<u8>> {
    let mut groups: HashMap<&str, Vec<u8>> = HashMap::new();
    for rating in ratings {
        groups
            .entry(rating.tool_id.as_str())
            .or_default()
            .push(rating.rating);
    }
    groups
}

/// 為每個工具附上平均分數，保留原本順序
pub fn annotate(tools: Vec<Tool>, ratings: &[Rating]) -> Vec<Tool> {
    let groups = group_by_tool(ratings);

    tools
        .into_iter()
        .map(|mut tool| {
            let values = groups.get(tool.id.as_str()).map(Vec::as_slice).unwrap_or(&[]);
            tool.average_rating = Some(average_rating(values));
            tool
        })
        .collect()
}

/// 同時抓取工具與評分並合併；任一失敗就整批放棄
pub async fn fetch_catalog<S>(store: &S) -> Result<Vec<Tool>>
where
    S: CatalogStore + ?Sized,
{
    let tools = async {
        store.list_tools().await.map_err(|e| CatalogError::FetchError {
            collection: "tools".to_string(),
            message: e.to_string(),
        })
    };
    let ratings = async {
        store.list_ratings().await.map_err(|e| CatalogError::FetchError {
            collection: "ratings".to_string(),
            message: e.to_string(),
        })
    };

    let (tools, ratings) = tokio::try_join!(tools, ratings)?;
    tracing::debug!("Fetched {} tools and {} ratings", tools.len(), ratings.len());

    Ok(annotate(tools, &ratings))
}
