use serde::{Deserialize, Serialize};

/// Обёртка `{ "data": ... }`, в которой API возвращает полезную нагрузку
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub data: T,
}

/// Сообщение по умолчанию, когда тело ошибки не содержит текста
pub const DEFAULT_ERROR_MESSAGE: &str = "Erro ao chamar API";

#[derive(Debug, Clone, Default, Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ErrorBody {
    error: Option<ErrorDetail>,
    message: Option<String>,
}

/// Текст ошибки из тела ответа: `error.message`, затем `message`, затем текст по умолчанию
pub fn error_message_from_body(body: Option<&serde_json::Value>) -> String {
    body.and_then(|b| serde_json::from_value::<ErrorBody>(b.clone()).ok())
        .and_then(|b| {
            b.error
                .and_then(|e| e.message)
                .filter(|m| !m.trim().is_empty())
                .or(b.message.filter(|m| !m.trim().is_empty()))
        })
        .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_message_precedence() {
        let body = json!({"error": {"message": "Token expirado"}, "message": "Unauthorized"});
        assert_eq!(error_message_from_body(Some(&body)), "Token expirado");

        let body = json!({"message": "Unauthorized"});
        assert_eq!(error_message_from_body(Some(&body)), "Unauthorized");

        let body = json!({"errors": {"title": ["obrigatório"]}});
        assert_eq!(error_message_from_body(Some(&body)), DEFAULT_ERROR_MESSAGE);

        assert_eq!(error_message_from_body(None), DEFAULT_ERROR_MESSAGE);
    }
}
