//! Client selection and quick client creation.

pub mod model;

use crate::shared::api_client::use_api;
use crate::shared::task::TaskSlot;
use contracts::domain::a002_client::{ClientListQuery, ClientRecord, NewClient};
use leptos::prelude::*;
use leptos::task::spawn_local;

pub const CLIENT_SEARCH_DEBOUNCE_MS: u32 = 300;

/// Which client modal a form has open
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClientSource {
    Registered,
    New,
}

/// Modal with the broker's clients. `on_apply` gets `None` when the
/// select is left empty.
#[component]
pub fn ClientPickerModal(
    /// Client id selected when the modal opens
    #[prop(into)]
    initial_selected_id: String,
    on_apply: Callback<Option<ClientRecord>>,
    on_close: Callback<()>,
) -> impl IntoView {
    let client = use_api();
    let clients = RwSignal::new(Vec::<ClientRecord>::new());
    let selected = RwSignal::new(initial_selected_id);
    let search = RwSignal::new(String::new());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(Option::<String>::None);

    let debounce = TaskSlot::new();
    let requests = TaskSlot::new();

    let fetch = {
        let requests = requests.clone();
        move |query: ClientListQuery| {
            let ticket = requests.arm();
            loading.set(true);
            error.set(None);
            spawn_local(async move {
                let result = model::list_clients(&client, &query).await;
                if !ticket.is_current() {
                    log::debug!("dropping stale clients response for {:?}", query.search);
                    return;
                }
                match result {
                    Ok(list) => clients.set(list),
                    Err(e) => error.set(Some(e.to_string())),
                }
                loading.set(false);
            });
        }
    };

    fetch(ClientListQuery::default());

    let on_search = {
        let debounce = debounce.clone();
        move |ev: leptos::ev::Event| {
            let value = event_target_value(&ev);
            search.set(value.clone());
            let fetch = fetch.clone();
            debounce.schedule(CLIENT_SEARCH_DEBOUNCE_MS, move || {
                fetch(ClientListQuery::search(&value))
            });
        }
    };

    on_cleanup(move || {
        debounce.cancel_all();
        requests.cancel_all();
    });

    let apply = move |_| {
        let chosen = clients.with_untracked(|list| {
            ClientRecord::find(list, &selected.get_untracked()).cloned()
        });
        on_apply.run(chosen);
        on_close.run(());
    };

    view! {
        <div class="modal-overlay" on:click=move |_| on_close.run(())>
            <div class="modal" on:click=|ev| ev.stop_propagation()>
                <div class="modal__header">
                    <h3>"Selecionar cliente"</h3>
                </div>
                <div class="modal__body">
                    <input
                        type="search"
                        placeholder="Buscar cliente"
                        prop:value=move || search.get()
                        on:input=on_search
                    />
                    {move || error.get().map(|e| view! { <p class="error">{e}</p> })}
                    <div class="form-group">
                        <label for="client-select">"Cliente"</label>
                        <select
                            id="client-select"
                            disabled=move || loading.get()
                            on:change=move |ev| selected.set(event_target_value(&ev))
                        >
                            <option value="" selected=move || selected.with(String::is_empty)>
                                {move || {
                                    if loading.get() {
                                        "Carregando clientes..."
                                    } else {
                                        "Selecione um cliente (opcional)"
                                    }
                                }}
                            </option>
                            {move || {
                                clients
                                    .get()
                                    .into_iter()
                                    .map(|c| {
                                        let value = c.id.to_string();
                                        let is_selected = {
                                            let value = value.clone();
                                            move || selected.with(|s| *s == value)
                                        };
                                        view! {
                                            <option value=value selected=is_selected>
                                                {c.option_label()}
                                            </option>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </select>
                    </div>
                </div>
                <div class="modal__footer">
                    <button class="btn-secondary" on:click=move |_| on_close.run(())>"Cancelar"</button>
                    <button class="btn-primary" disabled=move || loading.get() on:click=apply>
                        "Aplicar cliente"
                    </button>
                </div>
            </div>
        </div>
    }
}

/// Quick client registration; the created client is handed to `on_created`
#[component]
pub fn NewClientModal(on_created: Callback<ClientRecord>, on_close: Callback<()>) -> impl IntoView {
    let client = use_api();
    let form = RwSignal::new(NewClient::default());
    let saving = RwSignal::new(false);
    let error = RwSignal::new(Option::<String>::None);

    let save = move |_| {
        if saving.get_untracked() {
            return;
        }
        let payload = form.get_untracked();
        if let Err(message) = payload.validate() {
            error.set(Some(message));
            return;
        }
        saving.set(true);
        error.set(None);
        spawn_local(async move {
            let result = model::create_client(&client, &payload).await;
            saving.set(false);
            match result {
                Ok(created) => {
                    log::info!("client {} created", created.id);
                    on_created.run(created);
                    on_close.run(());
                }
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    };

    type Getter = fn(&NewClient) -> String;
    type Setter = fn(&mut NewClient, String);

    let field = move |id: &'static str, label: &'static str, get: Getter, set: Setter| {
        view! {
            <div class="form-group">
                <label for=id>{label}</label>
                <input
                    id=id
                    type="text"
                    prop:value=move || form.with(get)
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| set(f, value));
                    }
                />
            </div>
        }
    };

    view! {
        <div class="modal-overlay" on:click=move |_| on_close.run(())>
            <div class="modal" on:click=|ev| ev.stop_propagation()>
                <div class="modal__header">
                    <h3>"Criar cliente"</h3>
                </div>
                <div class="modal__body">
                    {field("new-client-name", "Nome", |f| f.name.clone(), |f, v| f.name = v)}
                    {field("new-client-phone", "Telefone", |f| f.phone.clone(), |f, v| f.phone = v)}
                    {field("new-client-email", "Email", |f| f.email.clone(), |f, v| f.email = v)}
                    {field(
                        "new-client-external-id",
                        "ID Externo",
                        |f| f.external_id.clone(),
                        |f, v| f.external_id = v,
                    )}
                    {move || error.get().map(|e| view! { <p class="error">{e}</p> })}
                </div>
                <div class="modal__footer">
                    <button class="btn-secondary" on:click=move |_| on_close.run(())>"Cancelar"</button>
                    <button class="btn-primary" disabled=move || saving.get() on:click=save>
                        {move || if saving.get() { "Criando cliente..." } else { "Salvar cliente" }}
                    </button>
                </div>
            </div>
        </div>
    }
}
