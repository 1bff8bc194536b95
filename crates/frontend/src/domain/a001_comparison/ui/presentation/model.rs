use contracts::domain::a001_comparison::dto::PresentationData;
use contracts::shared::envelope::ApiEnvelope;

use crate::shared::api_client::{ApiClient, ApiError};

/// API path of a signed presentation; a blank signature never reaches the server
pub fn presentation_path(id: &str, signature: Option<&str>) -> Result<String, ApiError> {
    let signature = signature
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(ApiError::MissingSignature)?;
    Ok(format!(
        "/public/comparisons/{}/presentation?signature={}",
        id,
        urlencoding::encode(signature)
    ))
}

pub async fn fetch_public_presentation(
    client: &ApiClient,
    id: &str,
    signature: Option<&str>,
) -> Result<PresentationData, ApiError> {
    let path = presentation_path(id, signature)?;
    let response: ApiEnvelope<PresentationData> = client.get(&path).await?;
    Ok(response.data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presentation_path_requires_signature() {
        assert_eq!(presentation_path("4", None), Err(ApiError::MissingSignature));
        assert_eq!(
            presentation_path("4", Some("  ")),
            Err(ApiError::MissingSignature)
        );
        assert_eq!(
            presentation_path("4", Some("a/b=")).as_deref(),
            Ok("/public/comparisons/4/presentation?signature=a%2Fb%3D")
        );
    }
}
