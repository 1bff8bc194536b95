pub mod model;

use contracts::domain::a001_comparison::dto::{ComparisonListItem, ComparisonListQuery};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use crate::shared::api_client::use_api;
use crate::shared::date_utils::format_datetime;
use crate::shared::task::TaskSlot;

pub const SEARCH_DEBOUNCE_MS: u32 = 300;

#[derive(Clone, Debug, PartialEq)]
pub struct ComparisonRow {
    pub id: String,
    pub title: String,
    pub modality: String,
    pub plan_type: String,
    pub lives_range: String,
    pub client_name: String,
    pub created_at: String,
}

impl From<ComparisonListItem> for ComparisonRow {
    fn from(c: ComparisonListItem) -> Self {
        Self {
            id: c.id.to_string(),
            title: c
                .title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| "Sem título".to_string()),
            modality: c.modality.map(|m| m.code().to_string()).unwrap_or_default(),
            plan_type: c
                .plan_type
                .map(|t| t.short_label().to_string())
                .unwrap_or_default(),
            lives_range: c.lives_range.unwrap_or_default(),
            client_name: c.client_name.unwrap_or_else(|| "-".to_string()),
            created_at: c.created_at.as_deref().map(format_datetime).unwrap_or_default(),
        }
    }
}

#[component]
#[allow(non_snake_case)]
pub fn ComparisonList() -> impl IntoView {
    let client = use_api();
    let items = RwSignal::new(Vec::<ComparisonRow>::new());
    let error = RwSignal::new(Option::<String>::None);
    let loading = RwSignal::new(true);
    let search = RwSignal::new(String::new());

    let debounce = TaskSlot::new();
    let requests = TaskSlot::new();

    // Only the latest request may write the table
    let fetch = {
        let requests = requests.clone();
        move |query: ComparisonListQuery| {
            let ticket = requests.arm();
            loading.set(true);
            error.set(None);
            spawn_local(async move {
                let result = model::list_comparisons(&client, &query).await;
                if !ticket.is_current() {
                    log::debug!("dropping stale comparisons response for {:?}", query.search);
                    return;
                }
                match result {
                    Ok(list) => items.set(list.into_iter().map(Into::into).collect()),
                    Err(e) => error.set(Some(e.to_string())),
                }
                loading.set(false);
            });
        }
    };

    fetch(ComparisonListQuery::default());

    let on_search = {
        let debounce = debounce.clone();
        let fetch = fetch.clone();
        move |ev: leptos::ev::Event| {
            let value = event_target_value(&ev);
            search.set(value.clone());
            let fetch = fetch.clone();
            debounce.schedule(SEARCH_DEBOUNCE_MS, move || {
                fetch(ComparisonListQuery::search(&value))
            });
        }
    };

    on_cleanup(move || {
        debounce.cancel_all();
        requests.cancel_all();
    });

    let handle_delete = {
        let fetch = fetch.clone();
        Callback::new(move |id: String| {
            let confirmed = web_sys::window()
                .and_then(|w| w.confirm_with_message("Deseja excluir esta comparação?").ok())
                .unwrap_or(false);
            if !confirmed {
                return;
            }
            let fetch = fetch.clone();
            spawn_local(async move {
                match model::delete_comparison(&client, &id).await {
                    Ok(()) => {
                        log::info!("comparison {} deleted", id);
                        fetch(ComparisonListQuery::search(&search.get_untracked()));
                    }
                    Err(e) => error.set(Some(e.to_string())),
                }
            });
        })
    };

    view! {
        <div class="page comparison-list">
            <div class="page__header">
                <h2>"Comparativos"</h2>
                <A href="/app/comparisons/create" attr:class="btn-primary">"Novo comparativo"</A>
            </div>

            <input
                type="search"
                class="page__search"
                placeholder="Buscar por título ou cliente"
                prop:value=move || search.get()
                on:input=on_search
            />

            {move || error.get().map(|e| view! { <div class="error">{e}</div> })}

            <Show
                when=move || !loading.get() || !items.with(Vec::is_empty)
                fallback=|| view! { <div class="muted">"Carregando..."</div> }
            >
                <Show
                    when=move || !items.with(Vec::is_empty)
                    fallback=|| view! { <div class="muted">"Nenhum comparativo encontrado."</div> }
                >
                    <table class="table">
                        <thead>
                            <tr>
                                <th>"Título"</th>
                                <th>"Cliente"</th>
                                <th>"Modalidade"</th>
                                <th>"Tipo"</th>
                                <th>"Vidas"</th>
                                <th>"Criado em"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || items.get()
                                key=|row| row.id.clone()
                                children=move |row: ComparisonRow| {
                                    let id = row.id.clone();
                                    view! {
                                        <tr>
                                            <td>
                                                <A href=format!("/app/comparisons/{}/edit", row.id)>
                                                    {row.title}
                                                </A>
                                            </td>
                                            <td>{row.client_name}</td>
                                            <td>{row.modality}</td>
                                            <td>{row.plan_type}</td>
                                            <td>{row.lives_range}</td>
                                            <td>{row.created_at}</td>
                                            <td>
                                                <button
                                                    class="btn-link btn-danger"
                                                    on:click=move |_| handle_delete.run(id.clone())
                                                >
                                                    "Excluir"
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                </Show>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_row_from_list_item() {
        let item: ComparisonListItem = serde_json::from_value(json!({
            "id": 15,
            "title": "  ",
            "modality": "PME",
            "type": "PARC",
            "lives_range": "2-29",
            "created_at": "2024-03-15T14:02:26.000000Z"
        }))
        .unwrap();
        let row = ComparisonRow::from(item);
        assert_eq!(row.id, "15");
        assert_eq!(row.title, "Sem título");
        assert_eq!(row.client_name, "-");
        assert_eq!(row.created_at, "15/03/2024 14:02");
    }
}
