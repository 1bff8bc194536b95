use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// ============================================================================
// RefId
// ============================================================================

/// Непрозрачная ссылка на внешнюю сущность каталога (регион, оператор, план, клиент).
///
/// API отдаёт идентификаторы то числами, то строками, поэтому сравнение
/// всегда идёт по каноническому строковому виду. При сериализации целые
/// значения уходят обратно числом.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RefId(String);

impl RefId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Числовое значение, если ссылка записана как целое без лишних символов
    /// ("007" и "+7" остаются строками, чтобы не потерять исходный вид)
    pub fn as_i64(&self) -> Option<i64> {
        self.0
            .parse::<i64>()
            .ok()
            .filter(|n| n.to_string() == self.0)
    }

    /// `None` для пустой ссылки
    pub fn non_empty(self) -> Option<Self> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

impl fmt::Display for RefId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RefId {
    fn from(value: &str) -> Self {
        RefId::new(value)
    }
}

impl From<String> for RefId {
    fn from(value: String) -> Self {
        RefId::new(value)
    }
}

impl From<i64> for RefId {
    fn from(value: i64) -> Self {
        RefId(value.to_string())
    }
}

impl Serialize for RefId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_i64() {
            Some(n) => serializer.serialize_i64(n),
            None => serializer.serialize_str(&self.0),
        }
    }
}

struct RefIdVisitor;

impl<'de> Visitor<'de> for RefIdVisitor {
    type Value = RefId;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an integer or string identifier")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<RefId, E> {
        Ok(RefId::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<RefId, E> {
        Ok(RefId(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<RefId, E> {
        if v.fract() == 0.0 && v.is_finite() {
            Ok(RefId(format!("{}", v as i64)))
        } else {
            Ok(RefId(v.to_string()))
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<RefId, E> {
        Ok(RefId::new(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<RefId, E> {
        Ok(RefId::new(v))
    }
}

impl<'de> Deserialize<'de> for RefId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RefIdVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_and_string_ids_compare_equal() {
        let a: RefId = serde_json::from_str("12").unwrap();
        let b: RefId = serde_json::from_str("\"12\"").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_integer_ids_serialize_as_numbers() {
        assert_eq!(serde_json::to_string(&RefId::from("7")).unwrap(), "7");
        assert_eq!(serde_json::to_string(&RefId::from("sp-capital")).unwrap(), "\"sp-capital\"");
    }

    #[test]
    fn test_padded_ids_keep_their_form() {
        let padded = RefId::from("007");
        assert_eq!(padded.as_i64(), None);
        assert_eq!(serde_json::to_string(&padded).unwrap(), "\"007\"");
        let back: RefId = serde_json::from_str(&serde_json::to_string(&padded).unwrap()).unwrap();
        assert_eq!(back, padded);
        assert_eq!(RefId::from("-3").as_i64(), Some(-3));
    }

    #[test]
    fn test_empty_id_is_unset() {
        assert_eq!(RefId::new("  ").non_empty(), None);
        assert_eq!(RefId::new(" 42 ").as_i64(), Some(42));
    }
}
