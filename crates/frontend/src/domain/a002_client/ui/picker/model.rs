use contracts::domain::a002_client::{ClientListQuery, ClientRecord, NewClient};
use contracts::shared::envelope::ApiEnvelope;

use crate::shared::api_client::{ApiClient, ApiError};

pub fn clients_path(query: &ClientListQuery) -> Result<String, ApiError> {
    let qs = serde_qs::to_string(query).map_err(|e| ApiError::Decode(e.to_string()))?;
    Ok(format!("/clients?{}", qs))
}

pub async fn list_clients(
    client: &ApiClient,
    query: &ClientListQuery,
) -> Result<Vec<ClientRecord>, ApiError> {
    let response: ApiEnvelope<Vec<ClientRecord>> = client.get(&clients_path(query)?).await?;
    Ok(response.data)
}

pub async fn create_client(client: &ApiClient, payload: &NewClient) -> Result<ClientRecord, ApiError> {
    let response: ApiEnvelope<ClientRecord> = client.post("/clients", payload).await?;
    Ok(response.data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clients_path_always_filters_clients() {
        assert_eq!(
            clients_path(&ClientListQuery::default()).unwrap(),
            "/clients?only_clients=1"
        );
        assert_eq!(
            clients_path(&ClientListQuery::search("  abc ")).unwrap(),
            "/clients?only_clients=1&search=abc"
        );
        assert_eq!(
            clients_path(&ClientListQuery::search("   ")).unwrap(),
            "/clients?only_clients=1"
        );
    }
}
