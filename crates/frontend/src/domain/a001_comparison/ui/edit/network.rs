//! Accredited network of the comparison plans.

use super::model;
use super::view_model::ComparisonEditViewModel;
use crate::shared::api_client::use_api;
use crate::shared::task::TaskSlot;
use contracts::domain::a003_reference::{network_rows, NetworkQuery, NetworkRow};
use leptos::ev::MouseEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

pub const NETWORK_SEARCH_DEBOUNCE_MS: u32 = 300;

#[component]
pub fn NetworkModal(vm: ComparisonEditViewModel) -> impl IntoView {
    let client = use_api();
    let comparison_id = vm.id.get_untracked();
    let plan_id = vm.network_plan.get_untracked();

    let rows = RwSignal::new(Vec::<NetworkRow>::new());
    let search = RwSignal::new(String::new());
    let region = RwSignal::new(String::new());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(Option::<String>::None);

    let debounce = TaskSlot::new();
    let requests = TaskSlot::new();

    let fetch = {
        let requests = requests.clone();
        move || {
            let query = NetworkQuery::new(
                plan_id.as_ref(),
                &search.get_untracked(),
                &region.get_untracked(),
            );
            let comparison_id = comparison_id.clone();
            let ticket = requests.arm();
            loading.set(true);
            error.set(None);
            spawn_local(async move {
                let result = model::fetch_network(&client, &comparison_id, &query).await;
                if !ticket.is_current() {
                    log::debug!("dropping stale network response for {:?}", query);
                    return;
                }
                match result {
                    Ok(entries) => rows.set(network_rows(&entries)),
                    Err(e) => error.set(Some(e.to_string())),
                }
                loading.set(false);
            });
        }
    };

    fetch();

    let on_search = {
        let debounce = debounce.clone();
        let fetch = fetch.clone();
        move |ev: leptos::ev::Event| {
            let value = event_target_value(&ev);
            let fetch = fetch.clone();
            debounce.schedule(NETWORK_SEARCH_DEBOUNCE_MS, move || {
                search.set(value);
                fetch();
            });
        }
    };
    let on_region = move |ev: leptos::ev::Event| {
        region.set(event_target_value(&ev));
        fetch();
    };

    on_cleanup(move || {
        debounce.cancel_all();
        requests.cancel_all();
    });

    let close = move |_: MouseEvent| vm.close_network();
    let close_overlay = close.clone();

    view! {
        <div class="modal-overlay" on:click=close_overlay>
            <div class="modal network-modal" on:click=|ev| ev.stop_propagation()>
                <div class="modal__header">
                    <h3>"Rede credenciada"</h3>
                    <button class="btn-secondary" on:click=close>"Fechar"</button>
                </div>
                <div class="modal__body">
                    <div class="filters">
                        <div class="form-group">
                            <label for="network-search">"Buscar hospital"</label>
                            <input
                                id="network-search"
                                type="search"
                                placeholder="Nome ou categoria"
                                on:input=on_search
                            />
                        </div>
                        <div class="form-group">
                            <label for="network-region">"Região"</label>
                            <input
                                id="network-region"
                                type="text"
                                placeholder="SP, RJ..."
                                prop:value=move || region.get()
                                on:input=on_region
                            />
                        </div>
                    </div>
                    {move || {
                        if loading.get() {
                            return view! { <div class="muted">"Carregando..."</div> }.into_any();
                        }
                        if let Some(message) = error.get() {
                            return view! { <div class="alert">{message}</div> }.into_any();
                        }
                        if rows.with(Vec::is_empty) {
                            return view! { <div class="muted">"Nenhum hospital encontrado."</div> }
                                .into_any();
                        }
                        view! {
                            <table class="network-table">
                                <thead>
                                    <tr>
                                        <th>"Hospital"</th>
                                        <th>"Categoria"</th>
                                        <th>"Região"</th>
                                        <th>"Plano"</th>
                                        <th>"Operadora"</th>
                                        <th>"Tipos"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <For
                                        each=move || rows.get()
                                        key=|row: &NetworkRow| row.key.clone()
                                        children=|row| {
                                            view! {
                                                <tr>
                                                    <td>{row.hospital}</td>
                                                    <td><span class="pill">{row.category}</span></td>
                                                    <td>{row.region}</td>
                                                    <td>{row.plan}</td>
                                                    <td>{row.operator}</td>
                                                    <td>{row.types}</td>
                                                </tr>
                                            }
                                        }
                                    />
                                </tbody>
                            </table>
                        }
                        .into_any()
                    }}
                </div>
            </div>
        </div>
    }
}
