use contracts::shared::envelope::ApiEnvelope;
use contracts::system::auth::{LoginRequest, LoginResponse, MeData, UserInfo};

use crate::shared::api_client::{ApiClient, ApiError};

/// Login with email and password, storing the token in the client's context
pub async fn login(client: &ApiClient, email: String, password: String) -> Result<(), ApiError> {
    let request = LoginRequest { email, password };
    let response: LoginResponse = client.post("/auth/login", &request).await?;
    let token = response
        .token()
        .ok_or_else(|| ApiError::Decode("token ausente na resposta de login".to_string()))?;
    client.auth().set_token(token);
    Ok(())
}

/// Get current user info
pub async fn me(client: &ApiClient) -> Result<UserInfo, ApiError> {
    let response: ApiEnvelope<MeData> = client.get("/me").await?;
    Ok(response.data.into_user())
}

/// Forget the session locally
pub fn logout(client: &ApiClient) {
    client.auth().logout();
}
