use contracts::domain::a001_comparison::dto::{
    ComparisonBootstrap, ComparisonSaveRequest, CreatedComparison,
};
use contracts::shared::envelope::ApiEnvelope;

use crate::shared::api_client::{ApiClient, ApiError};

pub async fn fetch_bootstrap(client: &ApiClient) -> Result<ComparisonBootstrap, ApiError> {
    let response: ApiEnvelope<ComparisonBootstrap> = client.get("/comparisons/bootstrap").await?;
    Ok(response.data)
}

/// Create a comparison and return its id
pub async fn create_comparison(
    client: &ApiClient,
    payload: &ComparisonSaveRequest,
) -> Result<Option<String>, ApiError> {
    let response: ApiEnvelope<CreatedComparison> = client.post("/comparisons", payload).await?;
    Ok(response
        .data
        .id
        .and_then(|id| id.non_empty())
        .map(|id| id.to_string()))
}
