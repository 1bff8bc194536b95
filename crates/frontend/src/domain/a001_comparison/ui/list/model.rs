use contracts::domain::a001_comparison::dto::{ComparisonListItem, ComparisonListQuery};
use contracts::shared::envelope::ApiEnvelope;
use serde_json::Value;

use crate::shared::api_client::{ApiClient, ApiError};

pub async fn list_comparisons(
    client: &ApiClient,
    query: &ComparisonListQuery,
) -> Result<Vec<ComparisonListItem>, ApiError> {
    let path = if query.is_empty() {
        "/comparisons".to_string()
    } else {
        let qs = serde_qs::to_string(query).map_err(|e| ApiError::Decode(e.to_string()))?;
        format!("/comparisons?{}", qs)
    };
    let response: ApiEnvelope<Vec<ComparisonListItem>> = client.get(&path).await?;
    Ok(response.data)
}

pub async fn delete_comparison(client: &ApiClient, id: &str) -> Result<(), ApiError> {
    let _: Value = client.delete(&format!("/comparisons/{}", id)).await?;
    Ok(())
}
