//! Header fields of a comparison: title, modality, region, lives range and type.

use contracts::domain::a001_comparison::dto::Region;
use contracts::domain::a001_comparison::{ComparisonEditState, FieldUpdate};
use contracts::domain::common::RefId;
use contracts::enums::{CoparticipationType, Modality};
use leptos::prelude::*;

#[component]
pub fn HeaderFields(
    state: RwSignal<ComparisonEditState>,
    #[prop(into)] regions: Signal<Vec<Region>>,
    #[prop(into)] lives_ranges: Signal<Vec<String>>,
    on_change: Callback<FieldUpdate>,
) -> impl IntoView {
    view! {
        <div class="details-form comparison-header-fields">
            <div class="form-group">
                <label for="comparison-title">"Nome da cotação"</label>
                <input
                    type="text"
                    id="comparison-title"
                    placeholder="Ex.: Empresa ABC - 2025"
                    prop:value=move || state.with(|s| s.header.title.clone())
                    on:input=move |ev| on_change.run(FieldUpdate::Title(event_target_value(&ev)))
                />
            </div>

            <div class="form-group">
                <label for="comparison-modality">"Modalidade"</label>
                <select
                    id="comparison-modality"
                    on:change=move |ev| {
                        on_change.run(FieldUpdate::Modality(Modality::from_code(&event_target_value(&ev))))
                    }
                >
                    {Modality::all()
                        .into_iter()
                        .map(|m| {
                            let code = m.code().to_string();
                            let value = code.clone();
                            view! {
                                <option
                                    value=value
                                    selected=move || state.with(|s| s.header.modality == m)
                                >
                                    {code}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </div>

            <div class="form-group">
                <label for="comparison-region">"Região"</label>
                <select
                    id="comparison-region"
                    on:change=move |ev| on_change.run(FieldUpdate::RegionId(RefId::new(event_target_value(&ev))))
                >
                    {move || {
                        regions
                            .get()
                            .into_iter()
                            .map(|r| {
                                let id = r.id.clone();
                                view! {
                                    <option
                                        value=r.id.to_string()
                                        selected=move || state.with(|s| s.header.region_id == id)
                                    >
                                        {r.name}
                                    </option>
                                }
                            })
                            .collect_view()
                    }}
                </select>
            </div>

            <div class="form-group">
                <label for="comparison-lives-range">"Faixa de vidas"</label>
                <select
                    id="comparison-lives-range"
                    on:change=move |ev| on_change.run(FieldUpdate::LivesRange(event_target_value(&ev)))
                >
                    {move || {
                        lives_ranges
                            .get()
                            .into_iter()
                            .map(|range| {
                                let current = range.clone();
                                let value = range.clone();
                                view! {
                                    <option
                                        value=value
                                        selected=move || state.with(|s| s.header.lives_range == current)
                                    >
                                        {range}
                                    </option>
                                }
                            })
                            .collect_view()
                    }}
                </select>
            </div>

            <div class="form-group">
                <label for="comparison-type">"Tipo"</label>
                <select
                    id="comparison-type"
                    on:change=move |ev| {
                        on_change.run(FieldUpdate::PlanType(CoparticipationType::from_code(&event_target_value(&ev))))
                    }
                >
                    {CoparticipationType::all()
                        .into_iter()
                        .map(|t| {
                            let code = t.code().to_string();
                            let label = t.display_name().to_string();
                            view! {
                                <option
                                    value=code
                                    selected=move || state.with(|s| s.header.plan_type == t)
                                >
                                    {label}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </div>
        </div>
    }
}
