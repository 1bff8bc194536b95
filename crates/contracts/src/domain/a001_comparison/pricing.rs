//! Расчёт ежемесячной стоимости выбранного плана по таблице цен.
//!
//! Сумма для режима соучастия = Σ по каждой faixa каталога
//! `snapshot[faixa] * unit_price[faixa]`. Если в таблице нет записи для
//! (plan, region, mode, lives_range), сумма не определена (`None`), а не ноль.

use super::aggregate::{Catalog, LifeSnapshot, Selection};
use super::dto::PlanOption;
use super::edit_state::ComparisonEditState;
use crate::domain::common::{lenient, RefId};
use crate::enums::CoparticipationType;
use crate::shared::fallback::{resolve_first, Resolved};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

pub const SOURCE_LIVE: &str = "live";
pub const SOURCE_CACHED: &str = "cached";

fn unit_prices<'de, D>(deserializer: D) -> Result<BTreeMap<String, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: BTreeMap<String, Value> = lenient::object_or_empty(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(k, v)| lenient::number_from_value(&v).map(|n| (k, n)))
        .collect())
}

/// Запись таблицы цен: цена за одну жизнь по каждой faixa
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanValue {
    pub plan_id: RefId,
    pub region_id: RefId,
    #[serde(rename = "type")]
    pub plan_type: CoparticipationType,
    #[serde(default)]
    pub lives_range: String,
    #[serde(default, deserialize_with = "unit_prices")]
    pub values: BTreeMap<String, f64>,
}

impl PlanValue {
    pub fn matches(
        &self,
        plan_id: &RefId,
        region_id: &RefId,
        mode: &CoparticipationType,
        lives_range: &str,
    ) -> bool {
        &self.plan_id == plan_id
            && &self.region_id == region_id
            && &self.plan_type == mode
            && self.lives_range == lives_range
    }

    /// Цена для faixa; отсутствующая цена считается нулём
    pub fn unit_price(&self, band_key: &str) -> f64 {
        self.values.get(band_key).copied().unwrap_or(0.0)
    }
}

/// Строка разбивки по одной faixa
#[derive(Debug, Clone, PartialEq)]
pub struct BandLine {
    pub key: String,
    pub label: String,
    pub qty: u32,
    pub unit_price: f64,
    pub subtotal: f64,
}

/// Суммы по всем трём режимам для одного выбранного плана
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ModeBreakdown {
    pub with_coparticipation: Option<Resolved<f64>>,
    pub partial: Option<Resolved<f64>>,
    pub without: Option<Resolved<f64>>,
}

impl ModeBreakdown {
    pub fn get(&self, mode: &CoparticipationType) -> Option<Resolved<f64>> {
        match mode {
            CoparticipationType::Com => self.with_coparticipation,
            CoparticipationType::Parc => self.partial,
            CoparticipationType::Sem => self.without,
            CoparticipationType::Other(_) => None,
        }
    }
}

/// Всё, что нужно для расчёта: таблица цен, каталог faixas и текущие поля черновика
#[derive(Debug, Clone, Copy)]
pub struct PricingContext<'a> {
    plan_values: &'a [PlanValue],
    faixas: &'a Catalog,
    region_id: &'a RefId,
    lives_range: &'a str,
    plan_type: &'a CoparticipationType,
    snapshot: &'a LifeSnapshot,
}

impl<'a> PricingContext<'a> {
    pub fn new(
        state: &'a ComparisonEditState,
        plan_values: &'a [PlanValue],
        faixas: &'a Catalog,
    ) -> Self {
        Self {
            plan_values,
            faixas,
            region_id: &state.header.region_id,
            lives_range: &state.header.lives_range,
            plan_type: &state.header.plan_type,
            snapshot: &state.snapshot,
        }
    }

    /// Первая запись таблицы для (plan, region, mode, lives_range)
    pub fn find(&self, plan_id: &RefId, mode: &CoparticipationType) -> Option<&'a PlanValue> {
        self.plan_values
            .iter()
            .find(|pv| pv.matches(plan_id, self.region_id, mode, self.lives_range))
    }

    pub fn compute_total(&self, plan_id: &RefId, mode: &CoparticipationType) -> Option<f64> {
        let pv = self.find(plan_id, mode)?;
        Some(
            self.faixas
                .keys()
                .map(|key| f64::from(self.snapshot.get(key)) * pv.unit_price(key))
                .sum(),
        )
    }

    pub fn band_lines(&self, plan_id: &RefId, mode: &CoparticipationType) -> Option<Vec<BandLine>> {
        let pv = self.find(plan_id, mode)?;
        Some(
            self.faixas
                .iter()
                .map(|entry| {
                    let qty = self.snapshot.get(&entry.key);
                    let unit_price = pv.unit_price(&entry.key);
                    BandLine {
                        key: entry.key.clone(),
                        label: entry.label.clone(),
                        qty,
                        unit_price,
                        subtotal: f64::from(qty) * unit_price,
                    }
                })
                .collect(),
        )
    }

    fn resolve_mode(&self, selection: &Selection, mode: &CoparticipationType) -> Option<Resolved<f64>> {
        resolve_first([
            (SOURCE_LIVE, self.compute_total(&selection.plan_id, mode)),
            (SOURCE_CACHED, selection.cached_total(mode)),
        ])
    }

    /// Все три режима независимо от текущего типа черновика
    pub fn breakdown(&self, selection: &Selection) -> ModeBreakdown {
        ModeBreakdown {
            with_coparticipation: self.resolve_mode(selection, &CoparticipationType::Com),
            partial: self.resolve_mode(selection, &CoparticipationType::Parc),
            without: self.resolve_mode(selection, &CoparticipationType::Sem),
        }
    }

    /// Основная сумма для текущего типа: живой расчёт, затем устаревшие поля
    /// выбранного плана, затем поля записи плана каталога
    pub fn primary_total(
        &self,
        selection: &Selection,
        plan: Option<&PlanOption>,
    ) -> Option<Resolved<f64>> {
        let mut sources = vec![(
            SOURCE_LIVE,
            self.compute_total(&selection.plan_id, self.plan_type),
        )];
        sources.extend(selection.legacy.sources());
        if let Some(plan) = plan {
            sources.extend(
                plan.legacy
                    .sources()
                    .into_iter()
                    .map(|(name, value)| (plan_source_name(name), value)),
            );
        }
        resolve_first(sources)
    }
}

fn plan_source_name(name: &'static str) -> &'static str {
    match name {
        "total" => "plan.total",
        "price" => "plan.price",
        "value" => "plan.value",
        _ => "plan.monthly_cost",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_comparison::aggregate::{FieldUpdate, LegacyTotals};
    use crate::domain::a001_comparison::dto::ComparisonEditData;
    use serde_json::json;

    fn faixas() -> Catalog {
        Catalog::from_pairs([("adult", "Adulto"), ("child", "Criança")])
    }

    fn table() -> Vec<PlanValue> {
        serde_json::from_value(json!([
            {"plan_id": 10, "region_id": 1, "type": "COM", "lives_range": "1-10",
             "values": {"adult": 100, "child": 50}},
            {"plan_id": 10, "region_id": 1, "type": "SEM", "lives_range": "1-10",
             "values": {"adult": "130.50"}},
            {"plan_id": 10, "region_id": 2, "type": "PARC", "lives_range": "1-10",
             "values": {"adult": 1, "child": 1}}
        ]))
        .unwrap()
    }

    fn state() -> ComparisonEditState {
        let mut s = ComparisonEditState::default();
        s.set_field(FieldUpdate::RegionId(RefId::from("1")));
        s.set_field(FieldUpdate::LivesRange("1-10".into()));
        s.update_snapshot("adult", "3");
        s.update_snapshot("child", "2");
        s
    }

    #[test]
    fn test_com_total_sums_bands() {
        let s = state();
        let table = table();
        let faixas = faixas();
        let ctx = PricingContext::new(&s, &table, &faixas);
        assert_eq!(
            ctx.compute_total(&RefId::from("10"), &CoparticipationType::Com),
            Some(400.0)
        );
    }

    #[test]
    fn test_missing_unit_price_counts_as_zero() {
        let s = state();
        let table = table();
        let faixas = faixas();
        let ctx = PricingContext::new(&s, &table, &faixas);
        assert_eq!(
            ctx.compute_total(&RefId::from("10"), &CoparticipationType::Sem),
            Some(391.5)
        );
    }

    #[test]
    fn test_no_matching_record_is_undefined_not_zero() {
        let s = state();
        let table = table();
        let faixas = faixas();
        let ctx = PricingContext::new(&s, &table, &faixas);
        // PARC exists only for region 2
        assert_eq!(
            ctx.compute_total(&RefId::from("10"), &CoparticipationType::Parc),
            None
        );
        assert_eq!(
            ctx.compute_total(&RefId::from("99"), &CoparticipationType::Com),
            None
        );
    }

    #[test]
    fn test_bands_outside_catalog_are_ignored() {
        let mut s = state();
        s.update_snapshot("senior", "9");
        let table = table();
        let faixas = faixas();
        let ctx = PricingContext::new(&s, &table, &faixas);
        assert_eq!(
            ctx.compute_total(&RefId::from("10"), &CoparticipationType::Com),
            Some(400.0)
        );
    }

    #[test]
    fn test_breakdown_ignores_current_type_and_falls_back_to_cache() {
        let mut s = state();
        s.set_field(FieldUpdate::PlanType(CoparticipationType::Sem));
        let table = table();
        let faixas = faixas();
        let ctx = PricingContext::new(&s, &table, &faixas);

        let mut sel = Selection::new(RefId::from("1"), RefId::from("10"));
        sel.total_coparticipacao_parcial = Some(250.0);
        let b = ctx.breakdown(&sel);

        let com = b.with_coparticipation.unwrap();
        assert_eq!((com.value, com.source), (400.0, SOURCE_LIVE));
        let parc = b.partial.unwrap();
        assert_eq!((parc.value, parc.source), (250.0, SOURCE_CACHED));
        assert_eq!(b.get(&CoparticipationType::Sem).map(|r| r.value), Some(391.5));
    }

    #[test]
    fn test_breakdown_without_price_or_cache_is_absent() {
        let s = state();
        let table = table();
        let faixas = faixas();
        let ctx = PricingContext::new(&s, &table, &faixas);
        let sel = Selection::new(RefId::from("1"), RefId::from("77"));
        let b = ctx.breakdown(&sel);
        assert!(b.with_coparticipation.is_none());
        assert!(b.partial.is_none());
        assert!(b.without.is_none());
    }

    #[test]
    fn test_primary_total_precedence() {
        let s = state();
        let table = table();
        let faixas = faixas();
        let ctx = PricingContext::new(&s, &table, &faixas);

        // live value for current type (COM)
        let sel = Selection::new(RefId::from("1"), RefId::from("10"));
        assert_eq!(ctx.primary_total(&sel, None).map(|r| r.value), Some(400.0));

        // no live value: selection legacy fields, then plan record
        let mut sel = Selection::new(RefId::from("1"), RefId::from("77"));
        let plan = PlanOption {
            id: RefId::from("77"),
            legacy: LegacyTotals {
                monthly_cost: Some(90.0),
                ..Default::default()
            },
            ..Default::default()
        };
        let r = ctx.primary_total(&sel, Some(&plan)).unwrap();
        assert_eq!((r.value, r.source), (90.0, "plan.monthly_cost"));

        sel.legacy.price = Some(120.0);
        let r = ctx.primary_total(&sel, Some(&plan)).unwrap();
        assert_eq!((r.value, r.source), (120.0, "price"));

        assert!(ctx
            .primary_total(&Selection::new(RefId::from("1"), RefId::from("77")), None)
            .is_none());
    }

    #[test]
    fn test_primary_total_after_load_with_blank_type() {
        let data: ComparisonEditData = serde_json::from_value(json!({
            "comparison": {"type": "", "modality": "", "region_id": 1, "lives_range": "1-10"},
            "existingSnapshot": {"adult": 3, "child": 2},
            "existingSelections": [{"operator_id": 1, "plan_id": 10}]
        }))
        .unwrap();
        let s = ComparisonEditState::from_load(&data);
        let table = table();
        let faixas = faixas();
        let ctx = PricingContext::new(&s, &table, &faixas);
        let r = ctx.primary_total(&s.selections[0], None).unwrap();
        assert_eq!((r.value, r.source), (400.0, SOURCE_LIVE));
    }

    #[test]
    fn test_band_lines() {
        let s = state();
        let table = table();
        let faixas = faixas();
        let ctx = PricingContext::new(&s, &table, &faixas);
        let lines = ctx
            .band_lines(&RefId::from("10"), &CoparticipationType::Com)
            .unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].label, "Adulto");
        assert_eq!(lines[0].subtotal, 300.0);
        assert_eq!(lines[1].subtotal, 100.0);
    }
}
