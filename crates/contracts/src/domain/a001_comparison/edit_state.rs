//! Состояние черновика сравнения на время одной сессии редактирования.
//!
//! Все операции синхронны и определены для любого достижимого состояния:
//! неверный индекс означает отсутствие изменений, а не ошибку.
//!
//! Инварианты:
//! - пары `(operator_id, plan_id)` в `selections` уникальны;
//! - `is_client_plan` установлен не более чем у одного выбранного плана;
//! - `is_featured` установлен не более чем у одного выбранного плана;
//! - количество жизней в `snapshot` неотрицательно.

use super::aggregate::{parse_life_count, ComparisonHeader, FieldUpdate, LifeSnapshot, Selection};
use super::dto::{ComparisonEditData, ComparisonPlanPayload, ComparisonSaveRequest};
use crate::domain::a002_client::ClientRecord;
use crate::domain::common::RefId;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComparisonEditState {
    pub header: ComparisonHeader,
    pub snapshot: LifeSnapshot,
    pub selections: Vec<Selection>,
    /// Оператор, чьи планы сейчас просматриваются; не сохраняется
    pub active_operator: Option<RefId>,
}

impl ComparisonEditState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_load(data: &ComparisonEditData) -> Self {
        let mut state = Self::default();
        state.initialize(data);
        state
    }

    /// Полностью заменяет черновик данными загрузки (без слияния с прежними правками)
    pub fn initialize(&mut self, data: &ComparisonEditData) {
        let record = data.comparison.clone().unwrap_or_default();

        let region_id = record
            .region_id
            .and_then(RefId::non_empty)
            .or_else(|| data.regions.first().map(|r| r.id.clone()))
            .unwrap_or_default();
        let lives_range = record
            .lives_range
            .filter(|r| !r.is_empty())
            .or_else(|| data.lives_ranges.first().cloned())
            .unwrap_or_default();
        // Пустой код означает «не задано», как и отсутствие поля
        let modality = record
            .modality
            .filter(|m| !m.code().is_empty())
            .unwrap_or_default();
        let plan_type = record
            .plan_type
            .filter(|t| !t.code().is_empty())
            .unwrap_or_default();

        *self = Self {
            header: ComparisonHeader {
                title: record.title.unwrap_or_default(),
                modality,
                region_id,
                lives_range,
                plan_type,
                client_id: record.client_id.and_then(RefId::non_empty),
                client_name: record.client_name.unwrap_or_default(),
                client_external_id: record.client_external_id.unwrap_or_default(),
                presentation_video_url: record.presentation_video_url.unwrap_or_default(),
            },
            snapshot: data.existing_snapshot.clone(),
            selections: dedup_selections(&data.existing_selections),
            active_operator: data.operators.first().map(|o| o.id.clone()),
        };
    }

    pub fn set_field(&mut self, update: FieldUpdate) {
        self.header.apply(update);
    }

    /// Привязка клиента из списка. Без клиента сбрасывается только ссылка,
    /// введённые вручную имя и внешний ID остаются
    pub fn select_client(&mut self, client: Option<&ClientRecord>) {
        match client {
            Some(c) => {
                self.header.client_id = c.id.clone().non_empty();
                self.header.client_name = c.name.clone();
                self.header.client_external_id = c.external_id.clone().unwrap_or_default();
            }
            None => self.header.client_id = None,
        }
    }

    pub fn set_active_operator(&mut self, operator_id: RefId) {
        self.active_operator = operator_id.non_empty();
    }

    pub fn position_of(&self, operator_id: &RefId, plan_id: &RefId) -> Option<usize> {
        self.selections
            .iter()
            .position(|s| s.matches(operator_id, plan_id))
    }

    pub fn is_selected(&self, operator_id: &RefId, plan_id: &RefId) -> bool {
        self.position_of(operator_id, plan_id).is_some()
    }

    /// Убирает пару, если она выбрана, иначе добавляет её в конец.
    /// Возвращает `true`, если пара теперь выбрана.
    pub fn toggle_selection(&mut self, operator_id: RefId, plan_id: RefId) -> bool {
        match self.position_of(&operator_id, &plan_id) {
            Some(idx) => {
                self.selections.remove(idx);
                false
            }
            None => {
                self.selections.push(Selection::new(operator_id, plan_id));
                true
            }
        }
    }

    /// Единственный план клиента; индекс вне диапазона ничего не меняет
    pub fn mark_client(&mut self, index: usize) {
        if index >= self.selections.len() {
            return;
        }
        for (idx, s) in self.selections.iter_mut().enumerate() {
            s.is_client_plan = idx == index;
        }
    }

    /// Единственный рекомендуемый план; индекс вне диапазона ничего не меняет
    pub fn mark_featured(&mut self, index: usize) {
        if index >= self.selections.len() {
            return;
        }
        for (idx, s) in self.selections.iter_mut().enumerate() {
            s.is_featured = idx == index;
        }
    }

    /// Удаляет план по индексу, последующие индексы сдвигаются на один
    pub fn remove_selection(&mut self, index: usize) -> Option<Selection> {
        if index < self.selections.len() {
            Some(self.selections.remove(index))
        } else {
            None
        }
    }

    pub fn update_snapshot(&mut self, band_key: &str, raw_value: &str) {
        self.snapshot.set(band_key, parse_life_count(raw_value));
    }

    /// Перемещает элемент `from` на позицию `to`, сохраняя порядок остальных
    pub fn reorder(&mut self, from: Option<usize>, to: Option<usize>) {
        let (Some(from), Some(to)) = (from, to) else {
            return;
        };
        let len = self.selections.len();
        if from == to || from >= len || to >= len {
            return;
        }
        let moved = self.selections.remove(from);
        self.selections.insert(to, moved);
    }

    pub fn total_lives(&self) -> u64 {
        self.snapshot.total()
    }

    /// Идентификаторы для drag-and-drop; зависят и от пары, и от позиции
    pub fn sortable_ids(&self) -> Vec<String> {
        self.selections
            .iter()
            .enumerate()
            .map(|(idx, s)| sortable_id(s, idx))
            .collect()
    }

    pub fn index_of_sortable_id(&self, id: &str) -> Option<usize> {
        self.selections
            .iter()
            .enumerate()
            .position(|(idx, s)| sortable_id(s, idx) == id)
    }

    pub fn client_plan(&self) -> Option<&Selection> {
        self.selections.iter().find(|s| s.is_client_plan)
    }

    pub fn featured_plan(&self) -> Option<&Selection> {
        self.selections.iter().find(|s| s.is_featured)
    }

    pub fn to_save_request(&self) -> ComparisonSaveRequest {
        let h = &self.header;
        ComparisonSaveRequest {
            title: h.title.clone(),
            modality: h.modality.clone(),
            region_id: h.region_id.clone().non_empty(),
            lives_range: h.lives_range.clone(),
            plan_type: h.plan_type.clone(),
            client_id: h.client_id.as_ref().and_then(RefId::as_i64),
            client_name: non_blank(&h.client_name),
            client_external_id: non_blank(&h.client_external_id),
            presentation_video_url: non_blank(&h.presentation_video_url),
            snapshot: self.snapshot.clone(),
            comparison_plans: self
                .selections
                .iter()
                .map(ComparisonPlanPayload::from)
                .collect(),
        }
    }
}

fn sortable_id(selection: &Selection, idx: usize) -> String {
    format!("{}-{}-{}", selection.operator_id, selection.plan_id, idx)
}

fn non_blank(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Повторная пара из ответа сервера отбрасывается, флаги остаются у первой
fn dedup_selections(loaded: &[Selection]) -> Vec<Selection> {
    let mut out: Vec<Selection> = Vec::with_capacity(loaded.len());
    let mut seen_client = false;
    let mut seen_featured = false;
    for s in loaded {
        if out.iter().any(|o| o.matches(&s.operator_id, &s.plan_id)) {
            continue;
        }
        let mut s = s.clone();
        s.is_client_plan = s.is_client_plan && !seen_client;
        s.is_featured = s.is_featured && !seen_featured;
        seen_client |= s.is_client_plan;
        seen_featured |= s.is_featured;
        out.push(s);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::{CoparticipationType, Modality};
    use serde_json::json;

    fn id(v: &str) -> RefId {
        RefId::from(v)
    }

    fn with_plans(pairs: &[(&str, &str)]) -> ComparisonEditState {
        let mut s = ComparisonEditState::new();
        for (op, plan) in pairs {
            s.toggle_selection(id(op), id(plan));
        }
        s
    }

    fn pairs(s: &ComparisonEditState) -> Vec<(String, String)> {
        s.selections
            .iter()
            .map(|x| (x.operator_id.to_string(), x.plan_id.to_string()))
            .collect()
    }

    fn load_fixture() -> ComparisonEditData {
        serde_json::from_value(json!({
            "comparison": {
                "title": "Empresa ABC",
                "modality": "EMPRESARIAL",
                "type": "PARC",
                "client_id": 15,
                "client_name": "ABC Ltda"
            },
            "regions": [{"id": 1, "name": "São Paulo"}, {"id": 2, "name": "Campinas"}],
            "livesRanges": ["0-29", "30-99"],
            "operators": [{"id": 3, "name": "Unimed"}, {"id": 4, "name": "Amil"}],
            "faixas": {"adult": "Adulto", "child": "Criança"},
            "existingSnapshot": {"adult": 3, "child": "2"},
            "existingSelections": [
                {"operator_id": 3, "plan_id": 10, "is_client_plan": true, "is_featured": 0,
                 "total_with_coparticipation": 400},
                {"operator_id": 4, "plan_id": 20, "is_client_plan": false, "is_featured": 1}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_initialize_applies_defaults_from_catalogs() {
        let s = ComparisonEditState::from_load(&load_fixture());
        assert_eq!(s.header.title, "Empresa ABC");
        assert_eq!(s.header.modality, Modality::Empresarial);
        assert_eq!(s.header.plan_type, CoparticipationType::Parc);
        assert_eq!(s.header.region_id, id("1"));
        assert_eq!(s.header.lives_range, "0-29");
        assert_eq!(s.header.client_id, Some(id("15")));
        assert_eq!(s.active_operator, Some(id("3")));
        assert_eq!(s.total_lives(), 5);
        assert_eq!(s.selections.len(), 2);
        assert!(s.selections[0].is_client_plan);
        assert!(s.selections[1].is_featured);
        assert_eq!(s.selections[0].total_with_coparticipation, Some(400.0));
    }

    #[test]
    fn test_initialize_empty_uses_defaults() {
        let s = ComparisonEditState::from_load(&ComparisonEditData::default());
        assert_eq!(s.header.modality, Modality::Pme);
        assert_eq!(s.header.plan_type, CoparticipationType::Com);
        assert!(s.header.region_id.is_empty());
        assert!(s.selections.is_empty());
        assert_eq!(s.active_operator, None);
    }

    #[test]
    fn test_initialize_blank_codes_use_defaults() {
        let data: ComparisonEditData = serde_json::from_value(json!({
            "comparison": {"type": "", "modality": " ", "region_id": 1, "lives_range": "1-10"},
            "existingSelections": [{"operator_id": 3, "plan_id": 10}]
        }))
        .unwrap();
        let s = ComparisonEditState::from_load(&data);
        assert_eq!(s.header.modality, Modality::Pme);
        assert_eq!(s.header.plan_type, CoparticipationType::Com);

        let request = s.to_save_request();
        assert_eq!(request.plan_type, CoparticipationType::Com);
        assert_eq!(request.modality, Modality::Pme);
    }

    #[test]
    fn test_select_client_fills_header_and_save_request() {
        let mut s = ComparisonEditState::from_load(&load_fixture());
        let clients: Vec<ClientRecord> = serde_json::from_value(json!([
            {"id": 4, "name": "Nova Empresa", "external_id": "CRM-9"},
            {"id": 5, "name": "Sem Código"}
        ]))
        .unwrap();

        s.select_client(ClientRecord::find(&clients, "4"));
        assert_eq!(s.header.client_id, Some(id("4")));
        let request = s.to_save_request();
        assert_eq!(request.client_id, Some(4));
        assert_eq!(request.client_name.as_deref(), Some("Nova Empresa"));
        assert_eq!(request.client_external_id.as_deref(), Some("CRM-9"));

        s.select_client(ClientRecord::find(&clients, "5"));
        assert_eq!(s.header.client_external_id, "");
        assert_eq!(s.to_save_request().client_external_id, None);

        // clearing the select keeps the typed name
        s.select_client(ClientRecord::find(&clients, ""));
        assert_eq!(s.header.client_id, None);
        assert_eq!(s.header.client_name, "Sem Código");
        assert_eq!(s.to_save_request().client_id, None);
    }

    #[test]
    fn test_initialize_replaces_prior_edits() {
        let data = load_fixture();
        let mut s = ComparisonEditState::from_load(&data);
        s.set_field(FieldUpdate::Title("rascunho".into()));
        s.toggle_selection(id("9"), id("90"));
        s.update_snapshot("adult", "40");

        s.initialize(&data);
        assert_eq!(s, ComparisonEditState::from_load(&data));
    }

    #[test]
    fn test_initialize_drops_duplicate_pairs_and_extra_flags() {
        let data: ComparisonEditData = serde_json::from_value(json!({
            "existingSelections": [
                {"operator_id": 3, "plan_id": 10, "is_client_plan": 1},
                {"operator_id": "3", "plan_id": "10"},
                {"operator_id": 3, "plan_id": 11, "is_client_plan": 1}
            ]
        }))
        .unwrap();
        let s = ComparisonEditState::from_load(&data);
        assert_eq!(s.selections.len(), 2);
        assert_eq!(s.selections.iter().filter(|x| x.is_client_plan).count(), 1);
    }

    #[test]
    fn test_toggle_never_duplicates() {
        let sequence = [
            ("1", "a"),
            ("1", "b"),
            ("2", "a"),
            ("1", "a"),
            ("1", "a"),
            ("2", "a"),
            ("1", "b"),
            ("3", "c"),
            ("1", "a"),
        ];
        let mut s = ComparisonEditState::new();
        for (op, plan) in sequence {
            s.toggle_selection(id(op), id(plan));
            let p = pairs(&s);
            for (i, a) in p.iter().enumerate() {
                assert!(!p[i + 1..].contains(a), "duplicate {:?} in {:?}", a, p);
            }
        }
        assert_eq!(pairs(&s), vec![("3".to_string(), "c".to_string())]);
    }

    #[test]
    fn test_toggle_twice_restores_selections() {
        let mut s = with_plans(&[("1", "a"), ("2", "b")]);
        s.mark_featured(1);
        let before = s.selections.clone();

        assert!(s.toggle_selection(id("3"), id("c")));
        assert!(!s.toggle_selection(id("3"), id("c")));
        assert_eq!(s.selections, before);
    }

    #[test]
    fn test_toggle_appends_with_flags_cleared() {
        let mut s = with_plans(&[("1", "a")]);
        s.mark_client(0);
        s.toggle_selection(id("2"), id("b"));
        let last = s.selections.last().unwrap();
        assert_eq!((last.operator_id.as_str(), last.plan_id.as_str()), ("2", "b"));
        assert!(!last.is_client_plan);
        assert!(!last.is_featured);
    }

    #[test]
    fn test_mark_client_is_exclusive() {
        let mut s = with_plans(&[("1", "a"), ("1", "b"), ("2", "c")]);
        for i in [0, 2, 1, 1] {
            s.mark_client(i);
            let marked: Vec<usize> = s
                .selections
                .iter()
                .enumerate()
                .filter(|(_, x)| x.is_client_plan)
                .map(|(idx, _)| idx)
                .collect();
            assert_eq!(marked, vec![i]);
        }
    }

    #[test]
    fn test_mark_out_of_bounds_is_noop() {
        let mut s = with_plans(&[("1", "a"), ("1", "b")]);
        s.mark_client(1);
        s.mark_featured(0);
        let before = s.clone();
        s.mark_client(2);
        s.mark_featured(7);
        assert_eq!(s, before);
    }

    #[test]
    fn test_client_and_featured_are_independent() {
        let mut s = with_plans(&[("1", "a"), ("1", "b")]);
        s.mark_client(0);
        s.mark_featured(0);
        assert!(s.selections[0].is_client_plan && s.selections[0].is_featured);
        s.mark_featured(1);
        assert!(s.selections[0].is_client_plan);
        assert_eq!(s.featured_plan().map(|x| x.plan_id.as_str()), Some("b"));
        assert_eq!(s.client_plan().map(|x| x.plan_id.as_str()), Some("a"));
    }

    #[test]
    fn test_remove_selection_shifts_indices() {
        let mut s = with_plans(&[("1", "A"), ("1", "B"), ("1", "C")]);
        let removed = s.remove_selection(1).unwrap();
        assert_eq!(removed.plan_id, id("B"));
        assert_eq!(
            pairs(&s),
            vec![("1".into(), "A".into()), ("1".into(), "C".into())]
        );
        // C lived at index 2, it is now found at index 1
        assert_eq!(s.position_of(&id("1"), &id("C")), Some(1));
        assert!(s.remove_selection(5).is_none());
    }

    #[test]
    fn test_update_snapshot_coercion() {
        let mut s = ComparisonEditState::new();
        s.update_snapshot("adult", "abc");
        assert_eq!(s.snapshot.get("adult"), 0);
        s.update_snapshot("adult", "7");
        assert_eq!(s.snapshot.get("adult"), 7);
        s.update_snapshot("child", "-5");
        assert_eq!(s.snapshot.get("child"), 0);
        s.update_snapshot("senior", "");
        assert_eq!(s.snapshot.get("senior"), 0);
    }

    #[test]
    fn test_total_lives_tracks_updates() {
        let mut s = ComparisonEditState::new();
        assert_eq!(s.total_lives(), 0);
        let updates = [("a", "3"), ("b", "4"), ("a", "1"), ("c", "x"), ("d", "10")];
        for (k, v) in updates {
            s.update_snapshot(k, v);
            let expected: u64 = s.snapshot.iter().map(|(_, c)| u64::from(c)).sum();
            assert_eq!(s.total_lives(), expected);
        }
        assert_eq!(s.total_lives(), 15);
    }

    #[test]
    fn test_reorder_moves_single_element() {
        let mut s = with_plans(&[("1", "A"), ("1", "B"), ("1", "C"), ("1", "D")]);
        s.reorder(Some(0), Some(2));
        let order: Vec<String> = s.selections.iter().map(|x| x.plan_id.to_string()).collect();
        assert_eq!(order, vec!["B", "C", "A", "D"]);

        s.reorder(Some(3), Some(0));
        let order: Vec<String> = s.selections.iter().map(|x| x.plan_id.to_string()).collect();
        assert_eq!(order, vec!["D", "B", "C", "A"]);
    }

    #[test]
    fn test_reorder_noops() {
        let mut s = with_plans(&[("1", "A"), ("1", "B"), ("1", "C")]);
        let before = s.clone();
        s.reorder(Some(1), Some(1));
        s.reorder(None, Some(1));
        s.reorder(Some(0), None);
        s.reorder(Some(0), Some(3));
        s.reorder(Some(4), Some(0));
        assert_eq!(s, before);
    }

    #[test]
    fn test_reorder_is_a_permutation() {
        let base = with_plans(&[("1", "A"), ("2", "B"), ("3", "C"), ("4", "D"), ("5", "E")]);
        for from in 0..5 {
            for to in 0..5 {
                let mut s = base.clone();
                s.reorder(Some(from), Some(to));
                let mut expected = base.selections.clone();
                let moved = expected.remove(from);
                expected.insert(to, moved);
                assert_eq!(s.selections, expected);

                let mut a = pairs(&s);
                let mut b = pairs(&base);
                a.sort();
                b.sort();
                assert_eq!(a, b);
            }
        }
    }

    #[test]
    fn test_sortable_ids_follow_position() {
        let mut s = with_plans(&[("1", "A"), ("2", "B")]);
        assert_eq!(s.sortable_ids(), vec!["1-A-0", "2-B-1"]);
        assert_eq!(s.sortable_ids(), s.sortable_ids());
        s.reorder(Some(0), Some(1));
        assert_eq!(s.sortable_ids(), vec!["2-B-0", "1-A-1"]);
        assert_eq!(s.index_of_sortable_id("1-A-1"), Some(1));
        assert_eq!(s.index_of_sortable_id("1-A-0"), None);
    }

    #[test]
    fn test_save_request_shape() {
        let mut s = ComparisonEditState::from_load(&load_fixture());
        s.set_field(FieldUpdate::PresentationVideoUrl("https://youtu.be/x".into()));
        s.reorder(Some(1), Some(0));
        let body = serde_json::to_value(s.to_save_request()).unwrap();
        assert_eq!(
            body,
            json!({
                "title": "Empresa ABC",
                "modality": "EMPRESARIAL",
                "region_id": 1,
                "lives_range": "0-29",
                "type": "PARC",
                "client_id": 15,
                "client_name": "ABC Ltda",
                "client_external_id": null,
                "presentation_video_url": "https://youtu.be/x",
                "snapshot": {"adult": 3, "child": 2},
                "comparisonPlans": [
                    {"operator_id": 4, "plan_id": 20, "is_client_plan": false, "is_featured": true},
                    {"operator_id": 3, "plan_id": 10, "is_client_plan": true, "is_featured": false}
                ]
            })
        );
    }
}
