use crate::domain::a001_comparison::dto::Operator;
use crate::domain::common::{lenient, RefId};
use serde::{Deserialize, Serialize};

const PLACEHOLDER: &str = "-";

fn trimmed(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn or_placeholder(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(PLACEHOLDER)
        .to_string()
}

// ============================================================================
// Больница сети
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hospital {
    #[serde(default)]
    pub id: Option<RefId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default, deserialize_with = "lenient::object_or_empty")]
    pub types: Vec<String>,
}

impl Hospital {
    pub fn category_label(&self) -> String {
        or_placeholder(self.category.as_deref())
    }

    pub fn region_label(&self) -> String {
        or_placeholder(self.region.as_deref())
    }

    /// Типы через запятую, "-" если их нет
    pub fn types_label(&self) -> String {
        let types: Vec<&str> = self
            .types
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .collect();
        if types.is_empty() {
            PLACEHOLDER.to_string()
        } else {
            types.join(", ")
        }
    }
}

// ============================================================================
// Сеть сравнения: GET /comparisons/{id}/network
// ============================================================================

/// Планы сравнения с их больницами
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkEntry {
    #[serde(default)]
    pub plan_id: Option<RefId>,
    #[serde(default)]
    pub plan: String,
    #[serde(default)]
    pub operator: String,
    #[serde(default, deserialize_with = "lenient::object_or_empty")]
    pub hospitals: Vec<Hospital>,
}

/// Строка таблицы сети: одна больница одного плана
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkRow {
    pub key: String,
    pub hospital: String,
    pub category: String,
    pub region: String,
    pub plan: String,
    pub operator: String,
    pub types: String,
}

/// Развернуть ответ в плоскую таблицу, сохраняя порядок планов и больниц
pub fn network_rows(entries: &[NetworkEntry]) -> Vec<NetworkRow> {
    entries
        .iter()
        .flat_map(|entry| {
            let plan_key = entry
                .plan_id
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default();
            entry.hospitals.iter().enumerate().map(move |(idx, h)| NetworkRow {
                key: format!("{}-{}-{}", plan_key, idx, h.name),
                hospital: h.name.clone(),
                category: h.category_label(),
                region: h.region_label(),
                plan: entry.plan.clone(),
                operator: entry.operator.clone(),
                types: h.types_label(),
            })
        })
        .collect()
}

/// Фильтры сети; пустые значения не передаются
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NetworkQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl NetworkQuery {
    pub fn new(plan_id: Option<&RefId>, search: &str, region: &str) -> Self {
        Self {
            plan_id: plan_id.filter(|id| !id.is_empty()).map(ToString::to_string),
            search: trimmed(search),
            region: trimmed(region),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.plan_id.is_none() && self.search.is_none() && self.region.is_none()
    }
}

// ============================================================================
// Справочники: GET /reference/{operators,plans,hospitals}
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferenceTab {
    #[default]
    Operators,
    Plans,
    Hospitals,
}

impl ReferenceTab {
    pub const ALL: [ReferenceTab; 3] = [
        ReferenceTab::Operators,
        ReferenceTab::Plans,
        ReferenceTab::Hospitals,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ReferenceTab::Operators => "Operadoras",
            ReferenceTab::Plans => "Planos",
            ReferenceTab::Hospitals => "Hospitais",
        }
    }

    pub fn endpoint(&self) -> &'static str {
        match self {
            ReferenceTab::Operators => "/reference/operators",
            ReferenceTab::Plans => "/reference/plans",
            ReferenceTab::Hospitals => "/reference/hospitals",
        }
    }
}

/// Фильтры справочника. Каждая вкладка передаёт только свои фильтры:
/// у операторов их нет, у планов поиск и оператор, у больниц поиск и регион
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReferenceQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl ReferenceQuery {
    pub fn for_tab(tab: ReferenceTab, search: &str, operator_id: &str, region: &str) -> Self {
        match tab {
            ReferenceTab::Operators => Self::default(),
            ReferenceTab::Plans => Self {
                search: trimmed(search),
                operator_id: trimmed(operator_id),
                region: None,
            },
            ReferenceTab::Hospitals => Self {
                search: trimmed(search),
                operator_id: None,
                region: trimmed(region),
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_none() && self.operator_id.is_none() && self.region.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferencePlan {
    pub id: RefId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub operator: Option<Operator>,
    #[serde(default)]
    pub operator_id: Option<RefId>,
    #[serde(default)]
    pub image: Option<String>,
}

impl ReferencePlan {
    /// Имя оператора, иначе его ID
    pub fn operator_label(&self) -> String {
        self.operator
            .as_ref()
            .map(|o| o.name.clone())
            .or_else(|| self.operator_id.as_ref().map(ToString::to_string))
            .unwrap_or_default()
    }
}

/// Содержимое вкладки справочника
#[derive(Debug, Clone, PartialEq)]
pub enum ReferenceRows {
    Operators(Vec<Operator>),
    Plans(Vec<ReferencePlan>),
    Hospitals(Vec<Hospital>),
}

impl ReferenceRows {
    pub fn empty(tab: ReferenceTab) -> Self {
        match tab {
            ReferenceTab::Operators => ReferenceRows::Operators(Vec::new()),
            ReferenceTab::Plans => ReferenceRows::Plans(Vec::new()),
            ReferenceTab::Hospitals => ReferenceRows::Hospitals(Vec::new()),
        }
    }

    pub fn tab(&self) -> ReferenceTab {
        match self {
            ReferenceRows::Operators(_) => ReferenceTab::Operators,
            ReferenceRows::Plans(_) => ReferenceTab::Plans,
            ReferenceRows::Hospitals(_) => ReferenceTab::Hospitals,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ReferenceRows::Operators(rows) => rows.is_empty(),
            ReferenceRows::Plans(rows) => rows.is_empty(),
            ReferenceRows::Hospitals(rows) => rows.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_network_rows_flatten_plans() {
        let entries: Vec<NetworkEntry> = serde_json::from_value(json!([
            {
                "plan_id": 10,
                "plan": "Essencial",
                "operator": "Vida+",
                "hospitals": [
                    {"name": "Santa Luzia", "category": "Premium", "region": "SP", "types": ["PS", "Internação"]},
                    {"name": "São Bento", "types": null}
                ]
            },
            {"plan_id": 11, "plan": "Master", "operator": "Vida+", "hospitals": []}
        ]))
        .unwrap();

        let rows = network_rows(&entries);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].key, "10-0-Santa Luzia");
        assert_eq!(rows[0].types, "PS, Internação");
        assert_eq!(rows[0].plan, "Essencial");
        assert_eq!(rows[1].category, "-");
        assert_eq!(rows[1].region, "-");
        assert_eq!(rows[1].types, "-");
    }

    #[test]
    fn test_network_query_skips_blank_filters() {
        let q = NetworkQuery::new(Some(&RefId::new("10")), "  ", " SP ");
        assert_eq!(q.plan_id.as_deref(), Some("10"));
        assert_eq!(q.search, None);
        assert_eq!(q.region.as_deref(), Some("SP"));
        assert!(NetworkQuery::new(Some(&RefId::new("")), "", "").is_empty());
    }

    #[test]
    fn test_reference_query_keeps_only_tab_filters() {
        let plans = ReferenceQuery::for_tab(ReferenceTab::Plans, "ess", "3", "SP");
        assert_eq!(plans.operator_id.as_deref(), Some("3"));
        assert_eq!(plans.region, None);

        let hospitals = ReferenceQuery::for_tab(ReferenceTab::Hospitals, "ess", "3", "SP");
        assert_eq!(hospitals.operator_id, None);
        assert_eq!(hospitals.region.as_deref(), Some("SP"));

        assert!(ReferenceQuery::for_tab(ReferenceTab::Operators, "ess", "3", "SP").is_empty());
    }

    #[test]
    fn test_plan_operator_label_falls_back_to_id() {
        let plans: Vec<ReferencePlan> = serde_json::from_value(json!([
            {"id": 1, "name": "Essencial", "operator": {"id": 3, "name": "Vida+"}},
            {"id": 2, "name": "Master", "operator_id": 4}
        ]))
        .unwrap();
        assert_eq!(plans[0].operator_label(), "Vida+");
        assert_eq!(plans[1].operator_label(), "4");
    }
}
