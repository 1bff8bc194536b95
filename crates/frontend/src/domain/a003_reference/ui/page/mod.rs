pub mod model;

use crate::shared::api_client::use_api;
use crate::shared::task::TaskSlot;
use contracts::domain::a001_comparison::dto::Operator;
use contracts::domain::a003_reference::{ReferenceQuery, ReferenceRows, ReferenceTab};
use leptos::prelude::*;
use leptos::task::spawn_local;

pub const REFERENCE_SEARCH_DEBOUNCE_MS: u32 = 300;

/// Operators, plans and hospitals catalogs
#[component]
#[allow(non_snake_case)]
pub fn ReferencePage() -> impl IntoView {
    let client = use_api();
    let tab = RwSignal::new(ReferenceTab::default());
    let search = RwSignal::new(String::new());
    let operator_id = RwSignal::new(String::new());
    let region = RwSignal::new(String::new());
    let rows = RwSignal::new(ReferenceRows::empty(ReferenceTab::default()));
    let operators = RwSignal::new(Vec::<Operator>::new());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(Option::<String>::None);

    let debounce = TaskSlot::new();
    let requests = TaskSlot::new();

    // Filters are read at call time; only the latest request may fill the table
    let fetch = {
        let requests = requests.clone();
        move || {
            let current = tab.get_untracked();
            let query = ReferenceQuery::for_tab(
                current,
                &search.get_untracked(),
                &operator_id.get_untracked(),
                &region.get_untracked(),
            );
            let ticket = requests.arm();
            loading.set(true);
            error.set(None);
            spawn_local(async move {
                let result = model::fetch_reference(&client, current, &query).await;
                if !ticket.is_current() {
                    log::debug!("dropping stale {:?} reference response", current);
                    return;
                }
                match result {
                    Ok(list) => {
                        if let ReferenceRows::Operators(ops) = &list {
                            operators.set(ops.clone());
                        }
                        rows.set(list);
                    }
                    Err(e) => error.set(Some(e.to_string())),
                }
                loading.set(false);
            });
        }
    };

    fetch();

    let select_tab = {
        let fetch = fetch.clone();
        move |next: ReferenceTab| {
            if tab.get_untracked() == next {
                return;
            }
            tab.set(next);
            rows.set(ReferenceRows::empty(next));
            fetch();
        }
    };
    let on_search = {
        let debounce = debounce.clone();
        let fetch = fetch.clone();
        move |ev: leptos::ev::Event| {
            let value = event_target_value(&ev);
            let fetch = fetch.clone();
            debounce.schedule(REFERENCE_SEARCH_DEBOUNCE_MS, move || {
                search.set(value);
                fetch();
            });
        }
    };
    let on_operator = {
        let fetch = fetch.clone();
        move |ev: leptos::ev::Event| {
            operator_id.set(event_target_value(&ev));
            fetch();
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

    view! {
        <section class="page reference">
            <div class="page__header">
                <div>
                    <h2>"Referências"</h2>
                    <p class="muted">"Consulte operadoras, planos e hospitais."</p>
                </div>
            </div>

            <div class="tabs">
                {ReferenceTab::ALL
                    .into_iter()
                    .map(|t| {
                        let select_tab = select_tab.clone();
                        view! {
                            <button
                                class="btn-secondary"
                                class:btn-primary=move || tab.get() == t
                                on:click=move |_| select_tab(t)
                            >
                                {t.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>

            <div class="filters">
                <div class="form-group">
                    <label for="reference-search">"Busca"</label>
                    <input
                        id="reference-search"
                        type="search"
                        placeholder="Digite para buscar"
                        on:input=on_search
                    />
                </div>
                <Show when=move || tab.get() == ReferenceTab::Plans>
                    <div class="form-group">
                        <label for="reference-operator">"Operadora"</label>
                        <select id="reference-operator" on:change=on_operator.clone()>
                            <option value="" selected=move || operator_id.with(String::is_empty)>
                                "Todas"
                            </option>
                            {move || {
                                operators
                                    .get()
                                    .into_iter()
                                    .map(|op| {
                                        let value = op.id.to_string();
                                        let is_selected = {
                                            let value = value.clone();
                                            move || operator_id.with(|s| *s == value)
                                        };
                                        view! {
                                            <option value=value selected=is_selected>{op.name}</option>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </select>
                    </div>
                </Show>
                <Show when=move || tab.get() == ReferenceTab::Hospitals>
                    <div class="form-group">
                        <label for="reference-region">"Região"</label>
                        <input
                            id="reference-region"
                            type="text"
                            placeholder="SP, RJ..."
                            prop:value=move || region.get()
                            on:input=on_region.clone()
                        />
                    </div>
                </Show>
            </div>

            <div class="panel">
                {move || {
                    if loading.get() {
                        return view! { <div class="muted">"Carregando..."</div> }.into_any();
                    }
                    if let Some(message) = error.get() {
                        return view! { <div class="alert">{message}</div> }.into_any();
                    }
                    if rows.with(ReferenceRows::is_empty) {
                        return view! { <div class="muted">"Nenhum resultado encontrado."</div> }
                            .into_any();
                    }
                    rows.with(render_rows)
                }}
            </div>
        </section>
    }
}

fn render_rows(rows: &ReferenceRows) -> AnyView {
    match rows {
        ReferenceRows::Operators(list) => view! {
            <table class="table">
                <thead>
                    <tr><th>"ID"</th><th>"Nome"</th><th>"Logo"</th></tr>
                </thead>
                <tbody>
                    {list
                        .iter()
                        .map(|op| {
                            let logo = op.logo.clone().filter(|l| !l.is_empty());
                            view! {
                                <tr>
                                    <td>{op.id.to_string()}</td>
                                    <td>{op.name.clone()}</td>
                                    <td>
                                        {match logo {
                                            Some(src) => view! {
                                                <img class="reference__logo" src=src alt=op.name.clone() />
                                            }
                                            .into_any(),
                                            None => "-".into_any(),
                                        }}
                                    </td>
                                </tr>
                            }
                        })
                        .collect_view()}
                </tbody>
            </table>
        }
        .into_any(),
        ReferenceRows::Plans(list) => view! {
            <table class="table">
                <thead>
                    <tr><th>"ID"</th><th>"Plano"</th><th>"Operadora"</th><th>"Imagem"</th></tr>
                </thead>
                <tbody>
                    {list
                        .iter()
                        .map(|plan| {
                            let image = plan.image.clone().filter(|i| !i.is_empty());
                            view! {
                                <tr>
                                    <td>{plan.id.to_string()}</td>
                                    <td>{plan.name.clone()}</td>
                                    <td>{plan.operator_label()}</td>
                                    <td>
                                        {match image {
                                            Some(src) => view! {
                                                <img class="reference__image" src=src alt=plan.name.clone() />
                                            }
                                            .into_any(),
                                            None => "-".into_any(),
                                        }}
                                    </td>
                                </tr>
                            }
                        })
                        .collect_view()}
                </tbody>
            </table>
        }
        .into_any(),
        ReferenceRows::Hospitals(list) => view! {
            <table class="table">
                <thead>
                    <tr><th>"ID"</th><th>"Hospital"</th><th>"Região"</th><th>"Categoria"</th></tr>
                </thead>
                <tbody>
                    {list
                        .iter()
                        .map(|h| {
                            view! {
                                <tr>
                                    <td>{h.id.as_ref().map(ToString::to_string).unwrap_or_default()}</td>
                                    <td>{h.name.clone()}</td>
                                    <td>{h.region_label()}</td>
                                    <td><span class="pill">{h.category_label()}</span></td>
                                </tr>
                            }
                        })
                        .collect_view()}
                </tbody>
            </table>
        }
        .into_any(),
    }
}
