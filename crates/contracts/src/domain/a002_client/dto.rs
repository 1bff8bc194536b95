use crate::domain::common::RefId;
use serde::{Deserialize, Serialize};

// ============================================================================
// Клиенты брокера: GET /clients, POST /clients
// ============================================================================

/// Клиент, к которому привязывается сравнение
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientRecord {
    pub id: RefId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl ClientRecord {
    /// Подпись в списке выбора: "Nome - ID externo"
    pub fn option_label(&self) -> String {
        match self.external_id.as_deref().map(str::trim) {
            Some(ext) if !ext.is_empty() => format!("{} - {}", self.name, ext),
            _ => self.name.clone(),
        }
    }

    /// Клиент по значению `<select>`; пустое значение означает «без клиента»
    pub fn find<'a>(clients: &'a [ClientRecord], selected: &str) -> Option<&'a ClientRecord> {
        let id = RefId::new(selected);
        if id.is_empty() {
            return None;
        }
        clients.iter().find(|c| c.id == id)
    }
}

/// Параметры списка. `only_clients=1` всегда передаётся: без него бэкенд
/// отдаёт и лиды
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientListQuery {
    pub only_clients: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl Default for ClientListQuery {
    fn default() -> Self {
        Self {
            only_clients: 1,
            search: None,
        }
    }
}

impl ClientListQuery {
    pub fn search(text: &str) -> Self {
        let trimmed = text.trim();
        Self {
            search: (!trimmed.is_empty()).then(|| trimmed.to_string()),
            ..Self::default()
        }
    }
}

/// Форма нового клиента
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewClient {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub external_id: String,
}

impl NewClient {
    /// Имя обязательно, остальные поля по желанию
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Informe o nome do cliente.".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn clients() -> Vec<ClientRecord> {
        serde_json::from_value(json!([
            {"id": 4, "name": "ABC Ltda", "external_id": "CRM-9"},
            {"id": "12", "name": "Maria Souza", "external_id": null}
        ]))
        .unwrap()
    }

    #[test]
    fn test_find_by_select_value() {
        let list = clients();
        assert_eq!(ClientRecord::find(&list, "4").map(|c| c.name.as_str()), Some("ABC Ltda"));
        assert_eq!(ClientRecord::find(&list, "12").map(|c| c.name.as_str()), Some("Maria Souza"));
        assert!(ClientRecord::find(&list, "").is_none());
        assert!(ClientRecord::find(&list, "99").is_none());
    }

    #[test]
    fn test_option_label() {
        let list = clients();
        assert_eq!(list[0].option_label(), "ABC Ltda - CRM-9");
        assert_eq!(list[1].option_label(), "Maria Souza");
    }

    #[test]
    fn test_new_client_requires_name() {
        let form = NewClient {
            name: "  ".into(),
            email: "a@b.com".into(),
            ..Default::default()
        };
        assert_eq!(form.validate(), Err("Informe o nome do cliente.".to_string()));
        let form = NewClient {
            name: "ABC".into(),
            ..form
        };
        assert!(form.validate().is_ok());
    }
}
