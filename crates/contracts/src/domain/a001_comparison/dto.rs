use super::aggregate::{Catalog, LegacyTotals, LifeSnapshot, Selection};
use super::pricing::PlanValue;
use crate::domain::common::{lenient, RefId};
use crate::enums::{CoparticipationType, Modality};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Загрузка для редактирования: GET /comparisons/{id}/edit
// ============================================================================

/// Запись сравнения в том виде, в каком её отдаёт бэкенд
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComparisonRecord {
    #[serde(default)]
    pub id: Option<RefId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub modality: Option<Modality>,
    #[serde(default)]
    pub region_id: Option<RefId>,
    #[serde(default)]
    pub lives_range: Option<String>,
    #[serde(default, rename = "type")]
    pub plan_type: Option<CoparticipationType>,
    #[serde(default)]
    pub client_id: Option<RefId>,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub client_external_id: Option<String>,
    #[serde(default)]
    pub presentation_video_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub created_by_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: RefId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operator {
    pub id: RefId,
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
}

/// План оператора из каталога
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanOption {
    pub id: RefId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    /// Сеть плана; для списка важна только длина
    #[serde(default)]
    pub hospitals: Option<Vec<serde_json::Value>>,
    #[serde(default, rename = "hospitals_count", deserialize_with = "lenient::amount")]
    pub hospitals_total: Option<f64>,
    #[serde(flatten)]
    pub legacy: LegacyTotals,
}

impl PlanOption {
    /// Путь к изображению: абсолютный URL как есть, иначе из хранилища бэкенда
    pub fn image_url(&self) -> Option<String> {
        self.image.as_ref().filter(|i| !i.is_empty()).map(|img| {
            if img.starts_with("http") {
                img.clone()
            } else {
                format!("/storage/{}", img)
            }
        })
    }

    /// Число больниц: длина списка, иначе счётчик из каталога
    pub fn hospitals_count(&self) -> Option<u32> {
        match &self.hospitals {
            Some(list) => Some(list.len() as u32),
            None => self
                .hospitals_total
                .filter(|n| *n >= 0.0)
                .map(|n| n as u32),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComparisonLinks {
    #[serde(default)]
    pub presentation: Option<String>,
    #[serde(default, rename = "apiPresentation")]
    pub api_presentation: Option<String>,
}

impl ComparisonLinks {
    /// Подписанная ссылка: сначала API-вариант, затем обычный
    pub fn signed_url(&self) -> Option<&str> {
        self.api_presentation
            .as_deref()
            .or(self.presentation.as_deref())
    }
}

/// Ответ загрузки сравнения для редактирования
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComparisonEditData {
    #[serde(default)]
    pub comparison: Option<ComparisonRecord>,
    #[serde(default)]
    pub regions: Vec<Region>,
    #[serde(default, rename = "livesRanges")]
    pub lives_ranges: Vec<String>,
    #[serde(default)]
    pub types: Catalog,
    #[serde(default)]
    pub operators: Vec<Operator>,
    /// Планы по ключу оператора
    #[serde(default, rename = "planOptions", deserialize_with = "lenient::object_or_empty")]
    pub plan_options: BTreeMap<String, Vec<PlanOption>>,
    #[serde(default)]
    pub faixas: Catalog,
    #[serde(default, rename = "existingSnapshot")]
    pub existing_snapshot: LifeSnapshot,
    #[serde(default, rename = "existingSelections")]
    pub existing_selections: Vec<Selection>,
    #[serde(default, rename = "planValues")]
    pub plan_values: Vec<PlanValue>,
    #[serde(default)]
    pub links: Option<ComparisonLinks>,
}

impl ComparisonEditData {
    pub fn plans_for(&self, operator_id: &RefId) -> &[PlanOption] {
        self.plan_options
            .get(operator_id.as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn plan(&self, operator_id: &RefId, plan_id: &RefId) -> Option<&PlanOption> {
        self.plans_for(operator_id).iter().find(|p| &p.id == plan_id)
    }

    pub fn operator(&self, operator_id: &RefId) -> Option<&Operator> {
        self.operators.iter().find(|o| &o.id == operator_id)
    }

    pub fn signed_presentation_url(&self) -> Option<&str> {
        self.links.as_ref().and_then(ComparisonLinks::signed_url)
    }
}

/// Справочники для формы создания: GET /comparisons/bootstrap
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComparisonBootstrap {
    #[serde(default)]
    pub regions: Vec<Region>,
    #[serde(default, rename = "livesRanges")]
    pub lives_ranges: Vec<String>,
    #[serde(default)]
    pub faixas: Catalog,
}

impl ComparisonBootstrap {
    /// Справочники формы создания в виде загрузки пустого сравнения,
    /// со всеми возрастными диапазонами, обнулёнными в snapshot
    pub fn into_edit_data(self) -> ComparisonEditData {
        ComparisonEditData {
            existing_snapshot: LifeSnapshot::zeroed(&self.faixas),
            regions: self.regions,
            lives_ranges: self.lives_ranges,
            faixas: self.faixas,
            ..Default::default()
        }
    }
}

// ============================================================================
// Сохранение
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonPlanPayload {
    pub operator_id: RefId,
    pub plan_id: RefId,
    pub is_client_plan: bool,
    pub is_featured: bool,
}

impl From<&Selection> for ComparisonPlanPayload {
    fn from(s: &Selection) -> Self {
        Self {
            operator_id: s.operator_id.clone(),
            plan_id: s.plan_id.clone(),
            is_client_plan: s.is_client_plan,
            is_featured: s.is_featured,
        }
    }
}

/// Тело запроса сохранения; порядок `comparisonPlans` сохраняется
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonSaveRequest {
    pub title: String,
    pub modality: Modality,
    pub region_id: Option<RefId>,
    pub lives_range: String,
    #[serde(rename = "type")]
    pub plan_type: CoparticipationType,
    pub client_id: Option<i64>,
    pub client_name: Option<String>,
    pub client_external_id: Option<String>,
    pub presentation_video_url: Option<String>,
    pub snapshot: LifeSnapshot,
    #[serde(rename = "comparisonPlans")]
    pub comparison_plans: Vec<ComparisonPlanPayload>,
}

/// Ответ создания: `{ data: { id } }`
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedComparison {
    #[serde(default)]
    pub id: Option<RefId>,
}

// ============================================================================
// Список
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComparisonListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl ComparisonListQuery {
    pub fn search(text: &str) -> Self {
        let trimmed = text.trim();
        Self {
            search: if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonListItem {
    pub id: RefId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub modality: Option<Modality>,
    #[serde(default, rename = "type")]
    pub plan_type: Option<CoparticipationType>,
    #[serde(default)]
    pub lives_range: Option<String>,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

// ============================================================================
// PDF
// ============================================================================

#[derive(Debug, Clone, Default, Serialize)]
pub struct PdfGenerateRequest {
    pub force: bool,
}

/// Ответ генерации PDF; бэкенд отдаёт поля то в camelCase, то в snake_case
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PdfInfoResponse {
    #[serde(default, rename = "signedUrl")]
    pub signed_url: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, rename = "createdAt", alias = "created_at")]
    pub created_at: Option<String>,
    #[serde(default, rename = "expiresAt", alias = "expires_at")]
    pub expires_at: Option<String>,
    #[serde(default, rename = "alreadyExisted", deserialize_with = "lenient::flag")]
    pub already_existed: bool,
}

impl PdfInfoResponse {
    pub fn link(&self) -> String {
        self.signed_url
            .clone()
            .or_else(|| self.url.clone())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PdfEmailRequest {
    pub to: String,
    pub message: String,
    pub url: String,
}

// ============================================================================
// Публичная презентация
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FaixaSummary {
    pub key: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub qty: Option<f64>,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub subtotal: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PresentationPlan {
    pub id: RefId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub operator: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_client_plan: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_featured: bool,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub total: Option<f64>,
    #[serde(default, rename = "faixaResumo")]
    pub faixa_resumo: Vec<FaixaSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PresentationData {
    #[serde(default)]
    pub id: Option<RefId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, rename = "type")]
    pub plan_type: Option<CoparticipationType>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub modality: Option<String>,
    #[serde(default)]
    pub lives_range: Option<String>,
    #[serde(default)]
    pub plans: Vec<PresentationPlan>,
}

impl PresentationData {
    pub fn client_plan(&self) -> Option<&PresentationPlan> {
        self.plans.iter().find(|p| p.is_client_plan)
    }

    pub fn featured_plan(&self) -> Option<&PresentationPlan> {
        self.plans.iter().find(|p| p.is_featured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plan_hospitals_count() {
        let plans: Vec<PlanOption> = serde_json::from_value(json!([
            {"id": 1, "hospitals": [{"name": "Santa Luzia"}, "São Bento"]},
            {"id": 2, "hospitals_count": "7"},
            {"id": 3, "hospitals": null},
            {"id": 4, "hospitals": [], "hospitals_count": 5}
        ]))
        .unwrap();
        let counts: Vec<Option<u32>> = plans.iter().map(PlanOption::hospitals_count).collect();
        assert_eq!(counts, vec![Some(2), Some(7), None, Some(0)]);
    }

    #[test]
    fn test_bootstrap_as_new_comparison() {
        let bootstrap: ComparisonBootstrap = serde_json::from_value(json!({
            "regions": [{"id": 3, "name": "Capital"}],
            "livesRanges": ["2-29", "30-99"],
            "faixas": {"0-18": "0 a 18", "19-23": "19 a 23"}
        }))
        .unwrap();
        let data = bootstrap.into_edit_data();
        assert!(data.comparison.is_none());
        assert_eq!(data.existing_snapshot.get("19-23"), 0);
        assert_eq!(data.existing_snapshot.iter().count(), 2);
        assert_eq!(data.lives_ranges[0], "2-29");
    }

    #[test]
    fn test_edit_data_tolerates_empty_php_arrays() {
        let data: ComparisonEditData = serde_json::from_value(json!({
            "comparison": {"title": "Empresa ABC", "region_id": null, "type": "SEM"},
            "planOptions": [],
            "faixas": [],
            "existingSnapshot": []
        }))
        .unwrap();
        assert!(data.plan_options.is_empty());
        assert!(data.faixas.is_empty());
        assert!(data.existing_snapshot.is_empty());
        let comparison = data.comparison.unwrap();
        assert_eq!(comparison.region_id, None);
        assert_eq!(comparison.plan_type, Some(CoparticipationType::Sem));
    }

    #[test]
    fn test_plans_for_operator_by_numeric_key() {
        let data: ComparisonEditData = serde_json::from_value(json!({
            "operators": [{"id": 5, "name": "Unimed"}],
            "planOptions": {"5": [{"id": 10, "name": "Essencial", "image": "plans/ess.png"}]}
        }))
        .unwrap();
        let op = RefId::from(5_i64);
        assert_eq!(data.plans_for(&op).len(), 1);
        let plan = data.plan(&op, &RefId::from("10")).unwrap();
        assert_eq!(plan.image_url().as_deref(), Some("/storage/plans/ess.png"));
        assert!(data.plans_for(&RefId::from(6_i64)).is_empty());
    }

    #[test]
    fn test_pdf_info_accepts_both_casings() {
        let a: PdfInfoResponse = serde_json::from_value(json!({
            "url": "https://cdn/x.pdf", "created_at": "2024-05-01T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(a.link(), "https://cdn/x.pdf");
        assert_eq!(a.created_at.as_deref(), Some("2024-05-01T10:00:00Z"));

        let b: PdfInfoResponse = serde_json::from_value(json!({
            "signedUrl": "https://cdn/s.pdf", "url": "https://cdn/x.pdf", "alreadyExisted": true
        }))
        .unwrap();
        assert_eq!(b.link(), "https://cdn/s.pdf");
        assert!(b.already_existed);
    }

    #[test]
    fn test_list_query_omits_blank_search() {
        assert!(ComparisonListQuery::search("   ").is_empty());
        assert_eq!(
            ComparisonListQuery::search(" ABC ").search.as_deref(),
            Some("ABC")
        );
    }
}
