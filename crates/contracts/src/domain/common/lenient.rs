//! Терпимые десериализаторы для полей, которые API отдаёт в разных формах
//! (числа строками, флаги как 0/1, пустые объекты как `[]`).

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Число из JSON-значения: число или числовая строка ("1.234,5" не поддерживается)
pub fn number_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
            }
        }
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Флаг: `true`, `1`, `"1"`, `"true"` считаются истиной
pub fn flag_from_value(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|n| n != 0.0).unwrap_or(false),
        Value::String(s) => matches!(s.trim(), "1" | "true" | "TRUE" | "True"),
        _ => false,
    }
}

pub fn amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_from_value))
}

pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(flag_from_value).unwrap_or(false))
}

/// Объект, который бэкенд сериализует как `[]`, когда он пуст
pub fn object_or_empty<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(T::default()),
        Some(Value::Array(items)) if items.is_empty() => Ok(T::default()),
        Some(other) => serde_json::from_value(other).map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_number_from_value() {
        assert_eq!(number_from_value(&json!(12.5)), Some(12.5));
        assert_eq!(number_from_value(&json!("310.40")), Some(310.4));
        assert_eq!(number_from_value(&json!("")), None);
        assert_eq!(number_from_value(&json!("abc")), None);
        assert_eq!(number_from_value(&Value::Null), None);
    }

    #[test]
    fn test_flag_from_value() {
        assert!(flag_from_value(&json!(1)));
        assert!(flag_from_value(&json!("1")));
        assert!(flag_from_value(&json!(true)));
        assert!(!flag_from_value(&json!(0)));
        assert!(!flag_from_value(&Value::Null));
    }
}
