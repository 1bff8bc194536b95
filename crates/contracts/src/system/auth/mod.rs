use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenPayload {
    #[serde(default)]
    pub token: Option<String>,
}

/// Ответ входа: токен лежит либо в `data.token`, либо в `token`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub data: Option<TokenPayload>,
    #[serde(default)]
    pub token: Option<String>,
}

impl LoginResponse {
    pub fn token(&self) -> Option<String> {
        self.data
            .as_ref()
            .and_then(|d| d.token.clone())
            .or_else(|| self.token.clone())
            .filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Ответ `/me`: `data.user` или сам `data`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MeData {
    #[serde(default)]
    pub user: Option<UserInfo>,
    #[serde(flatten)]
    pub inline: UserInfo,
}

impl MeData {
    pub fn into_user(self) -> UserInfo {
        match self.user {
            Some(user) if user.name.is_some() => user,
            _ => self.inline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_login_token_locations() {
        let nested: LoginResponse =
            serde_json::from_value(json!({"data": {"token": "abc"}})).unwrap();
        assert_eq!(nested.token().as_deref(), Some("abc"));

        let flat: LoginResponse = serde_json::from_value(json!({"token": "xyz"})).unwrap();
        assert_eq!(flat.token().as_deref(), Some("xyz"));

        let none: LoginResponse = serde_json::from_value(json!({"data": {}})).unwrap();
        assert_eq!(none.token(), None);
    }

    #[test]
    fn test_me_user_name() {
        let nested: MeData =
            serde_json::from_value(json!({"user": {"name": "Ana"}})).unwrap();
        assert_eq!(nested.into_user().name.as_deref(), Some("Ana"));

        let flat: MeData = serde_json::from_value(json!({"name": "Bruno", "id": 4})).unwrap();
        assert_eq!(flat.into_user().name.as_deref(), Some("Bruno"));
    }
}
