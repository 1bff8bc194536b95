use contracts::domain::a001_comparison::dto::Operator;
use contracts::domain::a003_reference::{Hospital, ReferencePlan, ReferenceQuery, ReferenceRows, ReferenceTab};
use contracts::shared::envelope::ApiEnvelope;

use crate::shared::api_client::{ApiClient, ApiError};

pub fn reference_path(tab: ReferenceTab, query: &ReferenceQuery) -> Result<String, ApiError> {
    if query.is_empty() {
        return Ok(tab.endpoint().to_string());
    }
    let qs = serde_qs::to_string(query).map_err(|e| ApiError::Decode(e.to_string()))?;
    Ok(format!("{}?{}", tab.endpoint(), qs))
}

pub async fn fetch_operators(client: &ApiClient) -> Result<Vec<Operator>, ApiError> {
    let response: ApiEnvelope<Vec<Operator>> =
        client.get(ReferenceTab::Operators.endpoint()).await?;
    Ok(response.data)
}

/// Rows of one tab; each tab decodes its own record type
pub async fn fetch_reference(
    client: &ApiClient,
    tab: ReferenceTab,
    query: &ReferenceQuery,
) -> Result<ReferenceRows, ApiError> {
    let path = reference_path(tab, query)?;
    let rows = match tab {
        ReferenceTab::Operators => ReferenceRows::Operators(fetch_operators(client).await?),
        ReferenceTab::Plans => {
            let response: ApiEnvelope<Vec<ReferencePlan>> = client.get(&path).await?;
            ReferenceRows::Plans(response.data)
        }
        ReferenceTab::Hospitals => {
            let response: ApiEnvelope<Vec<Hospital>> = client.get(&path).await?;
            ReferenceRows::Hospitals(response.data)
        }
    };
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_path_per_tab() {
        let path = |tab| reference_path(tab, &ReferenceQuery::for_tab(tab, "sul", "3", "RJ")).unwrap();
        assert_eq!(path(ReferenceTab::Operators), "/reference/operators");
        assert_eq!(path(ReferenceTab::Plans), "/reference/plans?search=sul&operator_id=3");
        assert_eq!(path(ReferenceTab::Hospitals), "/reference/hospitals?search=sul&region=RJ");
        assert_eq!(
            reference_path(ReferenceTab::Plans, &ReferenceQuery::for_tab(ReferenceTab::Plans, "", "", "")).unwrap(),
            "/reference/plans"
        );
    }
}
