pub mod model;

use crate::domain::a001_comparison::ui::edit::header::HeaderFields;
use crate::domain::a001_comparison::ui::edit::lives::LivesInputs;
use crate::domain::a002_client::ui::picker::{ClientPickerModal, ClientSource, NewClientModal};
use crate::shared::api_client::use_api;
use contracts::domain::a001_comparison::dto::ComparisonEditData;
use contracts::domain::a001_comparison::{ComparisonEditState, FieldUpdate};
use contracts::domain::a002_client::ClientRecord;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

pub const UNTITLED: &str = "Sem título";

/// New comparison form: header fields and lives per age band
#[component]
#[allow(non_snake_case)]
pub fn ComparisonCreate() -> impl IntoView {
    let client = use_api();
    let navigate = use_navigate();

    let data = RwSignal::new(Option::<ComparisonEditData>::None);
    let state = RwSignal::new(ComparisonEditState::new());
    let loading = RwSignal::new(true);
    let submitting = RwSignal::new(false);
    let error = RwSignal::new(Option::<String>::None);

    spawn_local(async move {
        match model::fetch_bootstrap(&client).await {
            Ok(bootstrap) => {
                let loaded = bootstrap.into_edit_data();
                state.set(ComparisonEditState::from_load(&loaded));
                data.set(Some(loaded));
            }
            Err(e) => error.set(Some(e.to_string())),
        }
        loading.set(false);
    });

    let on_field = Callback::new(move |update: FieldUpdate| state.update(|s| s.set_field(update)));
    let on_lives = Callback::new(move |(key, raw): (String, String)| {
        state.update(|s| s.update_snapshot(&key, &raw))
    });

    let client_modal = RwSignal::new(Option::<ClientSource>::None);
    let on_client = Callback::new(move |chosen: Option<ClientRecord>| {
        state.update(|s| s.select_client(chosen.as_ref()))
    });
    let on_client_created = Callback::new(move |created: ClientRecord| {
        state.update(|s| s.select_client(Some(&created)))
    });
    let close_client_modal = Callback::new(move |_: ()| client_modal.set(None));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let mut payload = state.with_untracked(ComparisonEditState::to_save_request);
        if payload.title.trim().is_empty() {
            payload.title = UNTITLED.to_string();
        }
        submitting.set(true);
        error.set(None);
        let navigate = navigate.clone();
        spawn_local(async move {
            match model::create_comparison(&client, &payload).await {
                Ok(Some(id)) => {
                    log::info!("comparison {} created", id);
                    navigate(&format!("/app/comparisons/{}/edit", id), Default::default());
                }
                Ok(None) => error.set(Some("Não foi possível obter o ID criado.".to_string())),
                Err(e) => error.set(Some(e.to_string())),
            }
            submitting.set(false);
        });
    };

    let regions = Signal::derive(move || {
        data.with(|d| d.as_ref().map(|d| d.regions.clone()).unwrap_or_default())
    });
    let lives_ranges = Signal::derive(move || {
        data.with(|d| d.as_ref().map(|d| d.lives_ranges.clone()).unwrap_or_default())
    });
    let faixas = Signal::derive(move || {
        data.with(|d| d.as_ref().map(|d| d.faixas.clone()).unwrap_or_default())
    });

    view! {
        <section class="page comparison-create">
            <h1>"Criar cotação"</h1>
            <p class="muted">"Informe um nome fácil para a cotação e siga para completar os dados."</p>

            {move || error.get().map(|e| view! { <div class="error">{e}</div> })}

            <Show
                when=move || !loading.get()
                fallback=|| view! { <div class="muted">"Carregando..."</div> }
            >
                <form class="form" on:submit=on_submit.clone()>
                    <HeaderFields
                        state=state
                        regions=regions
                        lives_ranges=lives_ranges
                        on_change=on_field
                    />
                    <h3>"Cliente"</h3>
                    <div class="client-summary">
                        <p>"Nome: " {move || state.with(|s| s.header.client_name.clone())}</p>
                        <p>"ID: " {move || state.with(|s| s.header.client_external_id.clone())}</p>
                        <button type="button" class="btn-secondary" on:click=move |_| client_modal.set(Some(ClientSource::Registered))>
                            "Adicionar cliente"
                        </button>
                        <button type="button" class="btn-secondary" on:click=move |_| client_modal.set(Some(ClientSource::New))>
                            "Criar novo cliente"
                        </button>
                    </div>
                    <h3>"Vidas por faixa etária"</h3>
                    <LivesInputs state=state faixas=faixas on_change=on_lives />
                    <button
                        type="submit"
                        class="btn-primary"
                        disabled=move || submitting.get()
                    >
                        {move || if submitting.get() { "Criando..." } else { "Criar e continuar" }}
                    </button>
                </form>
            </Show>

            {move || match client_modal.get() {
                Some(ClientSource::Registered) => {
                    let selected = state.with_untracked(|s| {
                        s.header.client_id.as_ref().map(ToString::to_string).unwrap_or_default()
                    });
                    view! {
                        <ClientPickerModal
                            initial_selected_id=selected
                            on_apply=on_client
                            on_close=close_client_modal
                        />
                    }
                    .into_any()
                }
                Some(ClientSource::New) => view! {
                    <NewClientModal on_created=on_client_created on_close=close_client_modal />
                }
                .into_any(),
                None => ().into_any(),
            }}
        </section>
    }
}
