use super::header::HeaderFields;
use super::lives::LivesModal;
use super::modals::{ClientModal, VideoLinkModal};
use super::network::NetworkModal;
use super::picker::PlanPicker;
use super::plans::PlansList;
use super::view_model::ComparisonEditViewModel;
use crate::domain::a001_comparison::ui::pdf::view_model::comparison_label;
use crate::domain::a001_comparison::ui::pdf::{PdfModal, PdfViewModel};
use crate::shared::api_client::use_api;
use crate::shared::api_utils::app_origin;
use crate::shared::clipboard::copy_to_clipboard_with_callback;
use crate::shared::date_utils::{format_datetime, format_since};
use contracts::domain::a001_comparison::{ComparisonEditState, FieldUpdate};
use leptos::ev::MouseEvent;
use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_params_map};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum OpenModal {
    Lives,
    Client,
    Video,
    Pdf,
}

#[component]
#[allow(non_snake_case)]
pub fn ComparisonEdit() -> impl IntoView {
    let client = use_api();
    let params = use_params_map();
    let navigate = use_navigate();

    let vm = ComparisonEditViewModel::new(client);
    let pdf = PdfViewModel::new(client);

    let modal = RwSignal::new(Option::<OpenModal>::None);
    let menu_open = RwSignal::new(false);
    let picker_open = RwSignal::new(true);
    let link_feedback = RwSignal::new(Option::<String>::None);

    {
        let vm = vm.clone();
        Effect::new(move |_| {
            let id = params.with(|p| p.get("id").unwrap_or_default());
            if !id.is_empty() {
                vm.load(id);
            }
        });
    }
    {
        let vm = vm.clone();
        let pdf = pdf.clone();
        on_cleanup(move || {
            vm.dispose();
            pdf.reset();
        });
    }

    let close_modal = {
        let pdf = pdf.clone();
        Callback::new(move |_: ()| {
            if modal.get_untracked() == Some(OpenModal::Pdf) {
                pdf.reset();
            }
            modal.set(None);
        })
    };

    let open_pdf = {
        let (vm, pdf) = (vm.clone(), pdf.clone());
        move |_: MouseEvent| {
            let id = vm.id.get_untracked();
            let label = vm.state.with_untracked(|s| comparison_label(&s.header.title, &id));
            pdf.open(id, label);
            menu_open.set(false);
            modal.set(Some(OpenModal::Pdf));
        }
    };

    let copy_link = {
        let vm = vm.clone();
        move |_: MouseEvent| {
            let link = vm.presentation_link(&app_origin());
            menu_open.set(false);
            copy_to_clipboard_with_callback(&link, move |ok| {
                link_feedback.set(Some(
                    if ok { "Link copiado" } else { "Não foi possível copiar o link" }.to_string(),
                ));
            });
        }
    };

    let open_network = {
        let vm = vm.clone();
        move |_: MouseEvent| {
            menu_open.set(false);
            vm.open_network(None);
        }
    };

    let delete = {
        let vm = vm.clone();
        let navigate = navigate.clone();
        move |_: MouseEvent| {
            menu_open.set(false);
            let confirmed = web_sys::window()
                .and_then(|w| w.confirm_with_message("Deseja excluir esta comparação?").ok())
                .unwrap_or(false);
            if !confirmed {
                return;
            }
            let navigate = navigate.clone();
            vm.delete(move || navigate("/app/comparisons", Default::default()));
        }
    };

    let on_field = {
        let vm = vm.clone();
        Callback::new(move |update: FieldUpdate| vm.set_field(update))
    };
    let on_lives = {
        let vm = vm.clone();
        Callback::new(move |(key, raw): (String, String)| vm.update_snapshot(&key, &raw))
    };

    let data = vm.data;
    let regions = Signal::derive(move || {
        data.with(|d| d.as_ref().map(|d| d.regions.clone()).unwrap_or_default())
    });
    let lives_ranges = Signal::derive(move || {
        data.with(|d| d.as_ref().map(|d| d.lives_ranges.clone()).unwrap_or_default())
    });
    let faixas = Signal::derive(move || {
        data.with(|d| d.as_ref().map(|d| d.faixas.clone()).unwrap_or_default())
    });

    let state = vm.state;
    let loading = vm.loading;
    let load_error = vm.load_error;
    let error = vm.error;
    let saving = vm.saving;
    let deleting = vm.deleting;
    let save_message = vm.save_message;
    let id = vm.id;

    let created_info = move || {
        data.with(|d| {
            let record = d.as_ref()?.comparison.as_ref()?;
            let created_at = record.created_at.clone()?;
            let creator = record
                .created_by_name
                .clone()
                .filter(|n| !n.trim().is_empty() && n.parse::<f64>().is_err())
                .unwrap_or_else(|| "Usuário".to_string());
            Some(format!(
                "Criado por {} em {} ({})",
                creator,
                format_datetime(&created_at),
                format_since(&created_at, chrono::Utc::now())
            ))
        })
    };

    let body = {
        let vm = vm.clone();
        let pdf = pdf.clone();
        move || {
            if loading.get() {
                return view! { <div class="muted">"Carregando..."</div> }.into_any();
            }
            if let Some(message) = load_error.get() {
                return view! { <div class="alert">{message}</div> }.into_any();
            }
            if data.with(Option::is_none) {
                return view! { <div class="muted">"Sem dados."</div> }.into_any();
            }

            let save_vm = vm.clone();
            let picker_vm = vm.clone();
            let (open_pdf, copy_link, delete) = (open_pdf.clone(), copy_link.clone(), delete.clone());
            let open_network = open_network.clone();
            view! {
                <header class="comparison-edit__header">
                    <div>
                        <div class="comparison-edit__eyebrow">"Comparação #" {move || id.get()}</div>
                        <h1>
                            {move || state.with(|s| {
                                if s.header.title.trim().is_empty() {
                                    "Sem título".to_string()
                                } else {
                                    s.header.title.clone()
                                }
                            })}
                        </h1>
                        {move || created_info().map(|c| view! { <p class="muted">{c}</p> })}
                    </div>

                    <div class="comparison-edit__actions">
                        <button class="btn-secondary" on:click=move |_| modal.set(Some(OpenModal::Lives))>
                            "Editar vidas"
                        </button>
                        <button class="btn-secondary" on:click=move |_| picker_open.update(|o| *o = !*o)>
                            "Escolher planos"
                        </button>
                        <button
                            class="btn-primary"
                            disabled=move || saving.get()
                            on:click=move |_| save_vm.save(false)
                        >
                            {move || if saving.get() { "Salvando..." } else { "Salvar" }}
                        </button>
                        <button class="icon-btn" title="Menu de ações" on:click=move |_| menu_open.update(|o| *o = !*o)>
                            "⋮"
                        </button>
                        <Show when=move || menu_open.get()>
                            <ul class="dropdown dropdown--right">
                                <li><button on:click=copy_link.clone()>"Copiar link apresentação"</button></li>
                                <li><button on:click=open_pdf.clone()>"Gerar PDF"</button></li>
                                <li><button on:click=open_network.clone()>"Rede credenciada"</button></li>
                                <li>
                                    <button on:click=move |_| {
                                        menu_open.set(false);
                                        modal.set(Some(OpenModal::Video));
                                    }>"Vídeo da apresentação"</button>
                                </li>
                                <li>
                                    <button on:click=move |_| {
                                        menu_open.set(false);
                                        modal.set(Some(OpenModal::Client));
                                    }>"Dados do cliente"</button>
                                </li>
                                <li>
                                    <button on:click=move |_| {
                                        menu_open.set(false);
                                        if let Some(w) = web_sys::window() {
                                            let _ = w.print();
                                        }
                                    }>"Imprimir"</button>
                                </li>
                                <li>
                                    <button
                                        class="btn-danger"
                                        disabled=move || deleting.get()
                                        on:click=delete.clone()
                                    >
                                        {move || if deleting.get() { "Excluindo..." } else { "Excluir" }}
                                    </button>
                                </li>
                            </ul>
                        </Show>
                    </div>
                </header>

                {move || error.get().map(|e| view! { <div class="alert">{e}</div> })}
                {move || link_feedback.get().map(|f| view! { <div class="muted">{f}</div> })}

                <div class="comparison-edit__grid">
                    <div class="comparison-edit__main">
                        <div class="comparison-edit__section-title">
                            <h3>"Planos selecionados"</h3>
                            <span class="pill">
                                {move || state.with(|s| s.selections.len())} " plano(s)"
                            </span>
                        </div>
                        <PlansList vm=vm.clone() />
                    </div>

                    <aside class="comparison-edit__side">
                        <HeaderFields
                            state=state
                            regions=regions
                            lives_ranges=lives_ranges
                            on_change=on_field
                        />
                        <div class="lives-total">
                            "Total de vidas: "
                            <strong>{move || state.with(ComparisonEditState::total_lives)}</strong>
                        </div>
                        <Show when=move || picker_open.get()>
                            <PlanPicker vm=picker_vm.clone() />
                        </Show>
                    </aside>
                </div>

                {
                    let vm = vm.clone();
                    let pdf = pdf.clone();
                    move || match modal.get() {
                        Some(OpenModal::Lives) => view! {
                            <LivesModal state=state faixas=faixas on_change=on_lives on_close=close_modal />
                        }
                        .into_any(),
                        Some(OpenModal::Client) => {
                            view! { <ClientModal vm=vm.clone() on_close=close_modal /> }.into_any()
                        }
                        Some(OpenModal::Video) => {
                            view! { <VideoLinkModal vm=vm.clone() on_close=close_modal /> }.into_any()
                        }
                        Some(OpenModal::Pdf) => {
                            view! { <PdfModal vm=pdf.clone() on_close=close_modal /> }.into_any()
                        }
                        None => ().into_any(),
                    }
                }
                {
                    let vm = vm.clone();
                    let open = vm.network_open;
                    move || open.get().then(|| view! { <NetworkModal vm=vm.clone() /> })
                }
            }
            .into_any()
        }
    };

    view! {
        <div class="page comparison-edit">
            {move || save_message.get().map(|m| view! { <div class="toast toast--success">{m}</div> })}
            {body}
        </div>
    }
}
