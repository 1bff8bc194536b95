//! Life-count inputs, one per age band, with the running total.

use contracts::domain::a001_comparison::{Catalog, ComparisonEditState};
use leptos::prelude::*;

#[component]
pub fn LivesInputs(
    state: RwSignal<ComparisonEditState>,
    #[prop(into)] faixas: Signal<Catalog>,
    on_change: Callback<(String, String)>,
) -> impl IntoView {
    view! {
        <div class="lives-grid">
            {move || {
                faixas
                    .get()
                    .iter()
                    .map(|entry| {
                        let key = entry.key.clone();
                        let input_key = entry.key.clone();
                        view! {
                            <div class="form-group lives-grid__item">
                                <label>{entry.label.clone()}</label>
                                <input
                                    type="number"
                                    min="0"
                                    step="1"
                                    prop:value=move || state.with(|s| s.snapshot.get(&key).to_string())
                                    on:input=move |ev| {
                                        on_change.run((input_key.clone(), event_target_value(&ev)))
                                    }
                                />
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
        <div class="lives-total">
            "Total de vidas: "
            <strong>{move || state.with(ComparisonEditState::total_lives)}</strong>
        </div>
    }
}

/// Modal wrapper around [`LivesInputs`]
#[component]
pub fn LivesModal(
    state: RwSignal<ComparisonEditState>,
    #[prop(into)] faixas: Signal<Catalog>,
    on_change: Callback<(String, String)>,
    on_close: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="modal-overlay" on:click=move |_| on_close.run(())>
            <div class="modal" on:click=|ev| ev.stop_propagation()>
                <div class="modal__header">
                    <h3>"Vidas por faixa etária"</h3>
                    <button class="modal__close" on:click=move |_| on_close.run(())>"×"</button>
                </div>
                <div class="modal__body">
                    <LivesInputs state=state faixas=faixas on_change=on_change />
                </div>
                <div class="modal__footer">
                    <button class="btn-primary" on:click=move |_| on_close.run(())>"Concluir"</button>
                </div>
            </div>
        </div>
    }
}
