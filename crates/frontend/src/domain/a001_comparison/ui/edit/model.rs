use contracts::domain::a001_comparison::dto::{ComparisonEditData, ComparisonSaveRequest};
use contracts::domain::a003_reference::{NetworkEntry, NetworkQuery};
use contracts::shared::envelope::ApiEnvelope;
use serde_json::Value;

use crate::shared::api_client::{ApiClient, ApiError};

pub async fn fetch_comparison_edit(
    client: &ApiClient,
    id: &str,
) -> Result<ComparisonEditData, ApiError> {
    let response: ApiEnvelope<ComparisonEditData> =
        client.get(&format!("/comparisons/{}/edit", id)).await?;
    Ok(response.data)
}

/// Laravel method spoofing: the update travels as a POST
pub async fn update_comparison(
    client: &ApiClient,
    id: &str,
    payload: &ComparisonSaveRequest,
) -> Result<(), ApiError> {
    let _: Value = client
        .post(&format!("/comparisons/{}?_method=PUT", id), payload)
        .await?;
    Ok(())
}

pub fn network_path(id: &str, query: &NetworkQuery) -> Result<String, ApiError> {
    let base = format!("/comparisons/{}/network", id);
    if query.is_empty() {
        return Ok(base);
    }
    let qs = serde_qs::to_string(query).map_err(|e| ApiError::Decode(e.to_string()))?;
    Ok(format!("{}?{}", base, qs))
}

/// Hospitals of the comparison plans, optionally narrowed to one plan
pub async fn fetch_network(
    client: &ApiClient,
    id: &str,
    query: &NetworkQuery,
) -> Result<Vec<NetworkEntry>, ApiError> {
    let response: ApiEnvelope<Vec<NetworkEntry>> = client.get(&network_path(id, query)?).await?;
    Ok(response.data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::common::RefId;

    #[test]
    fn test_network_path() {
        assert_eq!(
            network_path("5", &NetworkQuery::default()).unwrap(),
            "/comparisons/5/network"
        );
        let query = NetworkQuery::new(Some(&RefId::new("10")), "luzia", "SP");
        assert_eq!(
            network_path("5", &query).unwrap(),
            "/comparisons/5/network?plan_id=10&search=luzia&region=SP"
        );
    }
}
