use crate::domain::common::{lenient, RefId};
use crate::enums::{CoparticipationType, Modality};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;

// ============================================================================
// Snapshot (распределение жизней по возрастным диапазонам)
// ============================================================================

/// Разбор введённого количества жизней.
///
/// Всё, что не является конечным положительным числом, даёт 0; дробная часть
/// отбрасывается.
pub fn parse_life_count(raw: &str) -> u32 {
    match raw.trim().parse::<f64>() {
        Ok(n) if n.is_finite() && n > 0.0 => n.min(u32::MAX as f64).trunc() as u32,
        _ => 0,
    }
}

fn life_count_from_value(value: &Value) -> u32 {
    match lenient::number_from_value(value) {
        Some(n) if n > 0.0 => n.min(u32::MAX as f64).trunc() as u32,
        _ => 0,
    }
}

/// Количество жизней по ключу возрастного диапазона (faixa).
/// Отсутствующий ключ читается как 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LifeSnapshot(BTreeMap<String, u32>);

impl LifeSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Снимок с нулями для каждого диапазона каталога
    pub fn zeroed(faixas: &Catalog) -> Self {
        Self(faixas.keys().map(|k| (k.to_string(), 0)).collect())
    }

    pub fn get(&self, band_key: &str) -> u32 {
        self.0.get(band_key).copied().unwrap_or(0)
    }

    pub fn set(&mut self, band_key: impl Into<String>, count: u32) {
        self.0.insert(band_key.into(), count);
    }

    pub fn total(&self) -> u64 {
        self.0.values().map(|v| u64::from(*v)).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for LifeSnapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: BTreeMap<String, Value> = lenient::object_or_empty(deserializer)?;
        Ok(Self(
            raw.into_iter()
                .map(|(k, v)| (k, life_count_from_value(&v)))
                .collect(),
        ))
    }
}

// ============================================================================
// Catalog (справочник "ключ → подпись" с сохранением порядка)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub key: String,
    pub label: String,
}

/// Упорядоченный справочник, например faixas или подписи типов
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog(Vec<CatalogEntry>);

impl Catalog {
    pub fn from_pairs<K, L>(pairs: impl IntoIterator<Item = (K, L)>) -> Self
    where
        K: Into<String>,
        L: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, l)| CatalogEntry {
                    key: k.into(),
                    label: l.into(),
                })
                .collect(),
        )
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|e| e.key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.0.iter()
    }

    pub fn label(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.label.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<Value>::deserialize(deserializer)?;
        let entries = match value {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Object(map)) => map
                .into_iter()
                .map(|(key, label)| {
                    let label = match label {
                        Value::String(s) => s,
                        Value::Null => key.clone(),
                        other => other.to_string(),
                    };
                    CatalogEntry { key, label }
                })
                .collect(),
            // Список без подписей: ключ служит и подписью
            Some(Value::Array(items)) => items
                .into_iter()
                .map(|item| {
                    let key = match item {
                        Value::String(s) => s,
                        other => other.to_string(),
                    };
                    CatalogEntry {
                        label: key.clone(),
                        key,
                    }
                })
                .collect(),
            Some(other) => {
                return Err(serde::de::Error::custom(format!(
                    "expected catalog object, got {}",
                    other
                )))
            }
        };
        Ok(Self(entries))
    }
}

impl Serialize for Catalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for entry in &self.0 {
            map.serialize_entry(&entry.key, &entry.label)?;
        }
        map.end()
    }
}

// ============================================================================
// Selection (выбранный план внутри сравнения)
// ============================================================================

/// Устаревшие / альтернативные поля итоговой суммы, которые встречаются
/// у выбранного плана или в записи плана каталога
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegacyTotals {
    #[serde(default, deserialize_with = "lenient::amount", skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(default, deserialize_with = "lenient::amount", skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::amount", skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, deserialize_with = "lenient::amount", skip_serializing_if = "Option::is_none")]
    pub monthly_cost: Option<f64>,
}

impl LegacyTotals {
    /// Источники в порядке приоритета
    pub fn sources(&self) -> [(&'static str, Option<f64>); 4] {
        [
            ("total", self.total),
            ("price", self.price),
            ("value", self.value),
            ("monthly_cost", self.monthly_cost),
        ]
    }
}

/// Выбранная пара (оператор, план).
///
/// Пара `(operator_id, plan_id)` является естественным ключом и уникальна
/// внутри сравнения. Кэшированные суммы пришли с сервера при загрузке и
/// используются, пока живой расчёт недоступен.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub operator_id: RefId,
    pub plan_id: RefId,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_client_plan: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_featured: bool,

    #[serde(default, deserialize_with = "lenient::amount")]
    pub total_with_coparticipation: Option<f64>,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub total_coparticipacao_parcial: Option<f64>,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub total_without_coparticipation: Option<f64>,

    #[serde(flatten)]
    pub legacy: LegacyTotals,
}

impl Selection {
    pub fn new(operator_id: RefId, plan_id: RefId) -> Self {
        Self {
            operator_id,
            plan_id,
            ..Default::default()
        }
    }

    pub fn matches(&self, operator_id: &RefId, plan_id: &RefId) -> bool {
        &self.operator_id == operator_id && &self.plan_id == plan_id
    }

    /// Кэшированная сумма сервера для режима соучастия
    pub fn cached_total(&self, mode: &CoparticipationType) -> Option<f64> {
        match mode {
            CoparticipationType::Com => self.total_with_coparticipation,
            CoparticipationType::Parc => self.total_coparticipacao_parcial,
            CoparticipationType::Sem => self.total_without_coparticipation,
            CoparticipationType::Other(_) => None,
        }
    }
}

// ============================================================================
// Header
// ============================================================================

/// Скалярные поля заголовка сравнения
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComparisonHeader {
    pub title: String,
    pub modality: Modality,
    pub region_id: RefId,
    pub lives_range: String,
    pub plan_type: CoparticipationType,
    pub client_id: Option<RefId>,
    pub client_name: String,
    pub client_external_id: String,
    pub presentation_video_url: String,
}

/// Изменение одного скалярного поля заголовка.
/// Валидация выполняется вызывающей стороной.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    Title(String),
    Modality(Modality),
    RegionId(RefId),
    LivesRange(String),
    PlanType(CoparticipationType),
    ClientId(Option<RefId>),
    ClientName(String),
    ClientExternalId(String),
    PresentationVideoUrl(String),
}

impl ComparisonHeader {
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::Title(v) => self.title = v,
            FieldUpdate::Modality(v) => self.modality = v,
            FieldUpdate::RegionId(v) => self.region_id = v,
            FieldUpdate::LivesRange(v) => self.lives_range = v,
            FieldUpdate::PlanType(v) => self.plan_type = v,
            FieldUpdate::ClientId(v) => self.client_id = v.and_then(RefId::non_empty),
            FieldUpdate::ClientName(v) => self.client_name = v,
            FieldUpdate::ClientExternalId(v) => self.client_external_id = v,
            FieldUpdate::PresentationVideoUrl(v) => self.presentation_video_url = v,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_life_count() {
        assert_eq!(parse_life_count("7"), 7);
        assert_eq!(parse_life_count(" 12 "), 12);
        assert_eq!(parse_life_count("abc"), 0);
        assert_eq!(parse_life_count(""), 0);
        assert_eq!(parse_life_count("0"), 0);
        assert_eq!(parse_life_count("-5"), 0);
        assert_eq!(parse_life_count("3.9"), 3);
        // whole lives only: the fraction is dropped, not kept
        assert_eq!(parse_life_count("2.5"), 2);
        assert_eq!(parse_life_count("NaN"), 0);
    }

    #[test]
    fn test_snapshot_accepts_empty_array_and_string_counts() {
        let empty: LifeSnapshot = serde_json::from_value(json!([])).unwrap();
        assert!(empty.is_empty());

        let s: LifeSnapshot =
            serde_json::from_value(json!({"0-18": "4", "19-23": 2, "24-28": null})).unwrap();
        assert_eq!(s.get("0-18"), 4);
        assert_eq!(s.get("19-23"), 2);
        assert_eq!(s.get("24-28"), 0);
        assert_eq!(s.get("missing"), 0);
        assert_eq!(s.total(), 6);
    }

    #[test]
    fn test_catalog_keeps_server_order() {
        let c: Catalog =
            serde_json::from_value(json!({"59+": "59 ou mais", "0-18": "0 a 18"})).unwrap();
        let keys: Vec<&str> = c.keys().collect();
        assert_eq!(keys, vec!["59+", "0-18"]);
        assert_eq!(c.label("0-18"), Some("0 a 18"));
    }

    #[test]
    fn test_selection_from_wire() {
        let s: Selection = serde_json::from_value(json!({
            "operator_id": 3,
            "plan_id": "10",
            "is_client_plan": 1,
            "is_featured": 0,
            "total_with_coparticipation": "400.50",
            "total": 380
        }))
        .unwrap();
        assert_eq!(s.operator_id, RefId::from("3"));
        assert!(s.is_client_plan);
        assert!(!s.is_featured);
        assert_eq!(s.cached_total(&CoparticipationType::Com), Some(400.5));
        assert_eq!(s.cached_total(&CoparticipationType::Sem), None);
        assert_eq!(s.legacy.total, Some(380.0));
    }
}
