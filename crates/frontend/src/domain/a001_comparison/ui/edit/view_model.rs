use super::model;
use crate::domain::a001_comparison::ui::list::model as list_model;
use crate::shared::api_client::ApiClient;
use crate::shared::number_format::{format_mode_total, format_primary_total};
use crate::shared::task::TaskSlot;
use crate::shared::url_utils::{presentation_link, validate_video_link};
use contracts::domain::a001_comparison::dto::{ComparisonEditData, PlanOption};
use contracts::domain::a001_comparison::{BandLine, ComparisonEditState, FieldUpdate, PricingContext};
use contracts::domain::a002_client::ClientRecord;
use contracts::domain::common::RefId;
use contracts::enums::CoparticipationType;
use leptos::prelude::*;
use leptos::task::spawn_local;

pub const AUTOSAVE_DELAY_MS: u32 = 600;
pub const SAVE_MESSAGE_MS: u32 = 3000;

/// One selected plan as the plans list renders it
#[derive(Clone, Debug, PartialEq)]
pub struct PlanRow {
    pub sortable_id: String,
    pub operator_id: RefId,
    pub plan_id: RefId,
    pub operator_name: String,
    pub plan_name: String,
    pub image_url: Option<String>,
    pub is_client_plan: bool,
    pub is_featured: bool,
    pub hospitals: String,
    /// (label, formatted amount) for COM, PARC and SEM
    pub breakdown: Vec<(String, String)>,
    pub primary_total: String,
    pub band_lines: Vec<BandLine>,
}

/// Build the rows of the plans list from the draft and the loaded catalogs
pub fn plan_rows(state: &ComparisonEditState, data: &ComparisonEditData) -> Vec<PlanRow> {
    let pricing = PricingContext::new(state, &data.plan_values, &data.faixas);
    state
        .selections
        .iter()
        .zip(state.sortable_ids())
        .map(|(selection, sortable_id)| {
            let plan: Option<&PlanOption> = data.plan(&selection.operator_id, &selection.plan_id);
            let breakdown = pricing.breakdown(selection);
            PlanRow {
                sortable_id,
                operator_id: selection.operator_id.clone(),
                plan_id: selection.plan_id.clone(),
                operator_name: data
                    .operator(&selection.operator_id)
                    .map(|o| o.name.clone())
                    .unwrap_or_default(),
                plan_name: plan
                    .map(|p| p.name.clone())
                    .unwrap_or_else(|| format!("Plano #{}", selection.plan_id)),
                image_url: plan.and_then(PlanOption::image_url),
                is_client_plan: selection.is_client_plan,
                is_featured: selection.is_featured,
                hospitals: hospitals_label(plan.and_then(PlanOption::hospitals_count)),
                breakdown: CoparticipationType::BREAKDOWN
                    .iter()
                    .map(|mode| {
                        (
                            mode.short_label().to_string(),
                            format_mode_total(breakdown.get(mode).map(|r| r.value)),
                        )
                    })
                    .collect(),
                primary_total: format_primary_total(
                    pricing.primary_total(selection, plan).map(|r| r.value),
                ),
                band_lines: pricing
                    .band_lines(&selection.plan_id, &state.header.plan_type)
                    .unwrap_or_default(),
            }
        })
        .collect()
}

pub fn hospitals_label(count: Option<u32>) -> String {
    match count {
        Some(n) if n > 0 => format!("{} hospitais", n),
        _ => "Hospitais não informados".to_string(),
    }
}

/// ViewModel for the comparison edit page
#[derive(Clone)]
pub struct ComparisonEditViewModel {
    pub id: RwSignal<String>,
    pub data: RwSignal<Option<ComparisonEditData>>,
    pub state: RwSignal<ComparisonEditState>,
    pub loading: RwSignal<bool>,
    pub load_error: RwSignal<Option<String>>,
    pub error: RwSignal<Option<String>>,
    pub saving: RwSignal<bool>,
    pub deleting: RwSignal<bool>,
    pub save_message: RwSignal<Option<String>>,
    /// Network modal: open flag and the plan it is narrowed to
    pub network_open: RwSignal<bool>,
    pub network_plan: RwSignal<Option<RefId>>,
    client: ApiClient,
    load_slot: TaskSlot,
    autosave_slot: TaskSlot,
    message_slot: TaskSlot,
}

impl ComparisonEditViewModel {
    pub fn new(client: ApiClient) -> Self {
        Self {
            id: RwSignal::new(String::new()),
            data: RwSignal::new(None),
            state: RwSignal::new(ComparisonEditState::new()),
            loading: RwSignal::new(true),
            load_error: RwSignal::new(None),
            error: RwSignal::new(None),
            saving: RwSignal::new(false),
            deleting: RwSignal::new(false),
            save_message: RwSignal::new(None),
            network_open: RwSignal::new(false),
            network_plan: RwSignal::new(None),
            client,
            load_slot: TaskSlot::new(),
            autosave_slot: TaskSlot::new(),
            message_slot: TaskSlot::new(),
        }
    }

    /// Fetch the comparison; a response for a superseded or disposed load is dropped
    pub fn load(&self, id: String) {
        let ticket = self.load_slot.arm();
        self.autosave_slot.cancel_all();
        self.id.set(id.clone());
        self.network_open.set(false);
        self.loading.set(true);
        self.load_error.set(None);
        self.data.set(None);

        let vm = self.clone();
        spawn_local(async move {
            let result = model::fetch_comparison_edit(&vm.client, &id).await;
            if !ticket.is_current() {
                log::debug!("discarding stale load of comparison {}", id);
                return;
            }
            match result {
                Ok(data) => {
                    vm.state.set(ComparisonEditState::from_load(&data));
                    vm.data.set(Some(data));
                }
                Err(e) => {
                    log::warn!("failed to load comparison {}: {}", id, e);
                    vm.load_error.set(Some(e.to_string()));
                }
            }
            vm.loading.set(false);
        });
    }

    /// Stop every pending task; called when the page unmounts
    pub fn dispose(&self) {
        self.load_slot.cancel_all();
        self.autosave_slot.cancel_all();
        self.message_slot.cancel_all();
    }

    pub fn plan_rows(&self) -> Vec<PlanRow> {
        self.data.with(|data| match data {
            Some(data) => self.state.with(|state| plan_rows(state, data)),
            None => Vec::new(),
        })
    }

    pub fn active_plans(&self) -> Vec<PlanOption> {
        let operator = self.state.with(|s| s.active_operator.clone());
        match operator {
            Some(op) => self
                .data
                .with(|d| d.as_ref().map(|d| d.plans_for(&op).to_vec()))
                .unwrap_or_default(),
            None => Vec::new(),
        }
    }

    pub fn presentation_link(&self, origin: &str) -> String {
        let id = self.id.get_untracked();
        self.data.with_untracked(|d| {
            presentation_link(
                origin,
                &id,
                d.as_ref().and_then(ComparisonEditData::signed_presentation_url),
            )
        })
    }

    // ------------------------------------------------------------------
    // Mutations. Each one re-arms the autosave timer.
    // ------------------------------------------------------------------

    fn mutate(&self, f: impl FnOnce(&mut ComparisonEditState)) {
        self.state.update(f);
        self.schedule_autosave();
    }

    pub fn set_field(&self, update: FieldUpdate) {
        self.mutate(|s| s.set_field(update));
    }

    pub fn set_active_operator(&self, operator_id: RefId) {
        self.state.update(|s| s.set_active_operator(operator_id));
    }

    pub fn toggle_selection(&self, operator_id: RefId, plan_id: RefId) {
        self.mutate(|s| {
            s.toggle_selection(operator_id, plan_id);
        });
    }

    /// Row actions address a selection by identity; the index is looked up now
    pub fn mark_client(&self, operator_id: &RefId, plan_id: &RefId) {
        self.mutate(|s| {
            if let Some(idx) = s.position_of(operator_id, plan_id) {
                s.mark_client(idx);
            }
        });
    }

    pub fn mark_featured(&self, operator_id: &RefId, plan_id: &RefId) {
        self.mutate(|s| {
            if let Some(idx) = s.position_of(operator_id, plan_id) {
                s.mark_featured(idx);
            }
        });
    }

    pub fn remove_selection(&self, operator_id: &RefId, plan_id: &RefId) {
        self.mutate(|s| {
            if let Some(idx) = s.position_of(operator_id, plan_id) {
                s.remove_selection(idx);
            }
        });
    }

    pub fn update_snapshot(&self, band_key: &str, raw_value: &str) {
        self.mutate(|s| s.update_snapshot(band_key, raw_value));
    }

    /// Drop of a dragged row onto another one
    pub fn reorder_by_ids(&self, dragged: &str, target: &str) {
        self.mutate(|s| {
            let from = s.index_of_sortable_id(dragged);
            let to = s.index_of_sortable_id(target);
            s.reorder(from, to);
        });
    }

    /// Open the network modal, narrowed to one plan or across all of them
    pub fn open_network(&self, plan_id: Option<RefId>) {
        self.network_plan.set(plan_id);
        self.network_open.set(true);
    }

    pub fn close_network(&self) {
        self.network_open.set(false);
    }

    /// Bind a registered client; `None` only drops the link
    pub fn select_client(&self, client: Option<&ClientRecord>) {
        self.mutate(|s| s.select_client(client));
    }

    pub fn set_client_info(&self, name: String, external_id: String) {
        self.mutate(|s| {
            s.set_field(FieldUpdate::ClientName(name));
            s.set_field(FieldUpdate::ClientExternalId(external_id));
        });
    }

    /// Validate and store the presentation video link; the error is for the modal
    pub fn set_video_link(&self, raw: &str) -> Result<(), String> {
        let url = validate_video_link(raw)?;
        self.set_field(FieldUpdate::PresentationVideoUrl(url.unwrap_or_default()));
        Ok(())
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    fn schedule_autosave(&self) {
        if self.data.with_untracked(Option::is_none) {
            return;
        }
        let vm = self.clone();
        self.autosave_slot
            .schedule(AUTOSAVE_DELAY_MS, move || vm.save(true));
    }

    /// Save the draft. A silent save only logs its failure.
    pub fn save(&self, silent: bool) {
        if !silent {
            // explicit save supersedes a pending autosave
            self.autosave_slot.cancel_all();
            self.error.set(None);
        }
        let id = self.id.get_untracked();
        let payload = self.state.with_untracked(ComparisonEditState::to_save_request);
        let vm = self.clone();
        self.saving.set(true);
        spawn_local(async move {
            let result = model::update_comparison(&vm.client, &id, &payload).await;
            vm.saving.set(false);
            match result {
                Ok(()) if silent => log::debug!("autosaved comparison {}", id),
                Ok(()) => vm.flash_message("Salvo com sucesso"),
                Err(e) if silent => log::warn!("autosave of comparison {} failed: {}", id, e),
                Err(e) => vm.error.set(Some(e.to_string())),
            }
        });
    }

    fn flash_message(&self, message: &str) {
        self.save_message.set(Some(message.to_string()));
        let save_message = self.save_message;
        self.message_slot
            .schedule(SAVE_MESSAGE_MS, move || save_message.set(None));
    }

    pub fn delete(&self, on_deleted: impl FnOnce() + 'static) {
        let id = self.id.get_untracked();
        let vm = self.clone();
        self.deleting.set(true);
        self.error.set(None);
        spawn_local(async move {
            match list_model::delete_comparison(&vm.client, &id).await {
                Ok(()) => {
                    vm.dispose();
                    log::info!("comparison {} deleted", id);
                    on_deleted();
                }
                Err(e) => {
                    vm.error.set(Some(e.to_string()));
                    vm.deleting.set(false);
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn loaded() -> ComparisonEditData {
        serde_json::from_value(json!({
            "comparison": {"title": "Empresa ABC", "region_id": 1, "lives_range": "1-10", "type": "COM"},
            "regions": [{"id": 1, "name": "Capital"}],
            "livesRanges": ["1-10"],
            "operators": [{"id": 7, "name": "Operadora Sul"}],
            "planOptions": {"7": [
                {"id": 10, "name": "Essencial", "hospitals": [{"name": "Santa Luzia"}, {"name": "São Bento"}]},
                {"id": 11, "name": "Premium", "total": 980.0}
            ]},
            "faixas": {"adult": "Adulto", "child": "Criança"},
            "existingSnapshot": {"adult": 3, "child": 2},
            "existingSelections": [
                {"operator_id": 7, "plan_id": 10, "is_client_plan": 1, "is_featured": 0},
                {"operator_id": 7, "plan_id": 11, "is_client_plan": 0, "is_featured": 0,
                 "total_without_coparticipation": 1200}
            ],
            "planValues": [
                {"plan_id": 10, "region_id": 1, "type": "COM", "lives_range": "1-10",
                 "values": {"adult": 100, "child": 50}}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_plan_rows_breakdown_and_primary_total() {
        let data = loaded();
        let state = ComparisonEditState::from_load(&data);
        let rows = plan_rows(&state, &data);
        assert_eq!(rows.len(), 2);

        let first = &rows[0];
        assert_eq!(first.plan_name, "Essencial");
        assert_eq!(first.operator_name, "Operadora Sul");
        assert!(first.is_client_plan);
        assert_eq!(first.primary_total, "R$ 400,00");
        assert_eq!(
            first.breakdown,
            vec![
                ("Com copart.".to_string(), "R$ 400,00".to_string()),
                ("Parcial".to_string(), "—".to_string()),
                ("Sem copart.".to_string(), "—".to_string()),
            ]
        );
        assert_eq!(first.band_lines.len(), 2);
        assert_eq!(first.hospitals, "2 hospitais");

        // no live price: cached SEM value, placeholder elsewhere, legacy plan total on top
        let second = &rows[1];
        assert_eq!(second.breakdown[0].1, "—");
        assert_eq!(second.breakdown[2].1, "R$ 1.200,00");
        assert_eq!(second.primary_total, "R$ 980,00");
        assert!(second.band_lines.is_empty());
        assert_eq!(second.hospitals, "Hospitais não informados");
    }

    #[test]
    fn test_sortable_ids_follow_rows() {
        let data = loaded();
        let mut state = ComparisonEditState::from_load(&data);
        state.reorder(Some(1), Some(0));
        let rows = plan_rows(&state, &data);
        assert_eq!(rows[0].sortable_id, "7-11-0");
        assert_eq!(rows[1].sortable_id, "7-10-1");
    }
}
