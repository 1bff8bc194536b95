//! Small editing modals: client info and presentation video link.

use super::view_model::ComparisonEditViewModel;
use crate::domain::a002_client::ui::picker::{ClientPickerModal, ClientSource, NewClientModal};
use contracts::domain::a002_client::ClientRecord;
use leptos::prelude::*;

#[component]
pub fn ClientModal(vm: ComparisonEditViewModel, on_close: Callback<()>) -> impl IntoView {
    let (name, external_id) = vm.state.with_untracked(|s| {
        (
            s.header.client_name.clone(),
            s.header.client_external_id.clone(),
        )
    });
    let name = RwSignal::new(name);
    let external_id = RwSignal::new(external_id);
    let source = RwSignal::new(Option::<ClientSource>::None);

    let on_client = {
        let vm = vm.clone();
        Callback::new(move |chosen: Option<ClientRecord>| {
            vm.select_client(chosen.as_ref());
            vm.state.with_untracked(|s| {
                name.set(s.header.client_name.clone());
                external_id.set(s.header.client_external_id.clone());
            });
        })
    };
    let on_created = Callback::new(move |created: ClientRecord| on_client.run(Some(created)));
    let close_source = Callback::new(move |_: ()| source.set(None));
    let selected_id = vm.state.with_untracked(|s| {
        s.header.client_id.as_ref().map(ToString::to_string).unwrap_or_default()
    });

    let save = move |_| {
        vm.set_client_info(name.get_untracked(), external_id.get_untracked());
        on_close.run(());
    };

    view! {
        <div class="modal-overlay" on:click=move |_| on_close.run(())>
            <div class="modal" on:click=|ev| ev.stop_propagation()>
                <div class="modal__header">
                    <h3>"Dados do cliente"</h3>
                </div>
                <div class="modal__body">
                    <div class="modal__actions">
                        <button class="btn-secondary" on:click=move |_| source.set(Some(ClientSource::Registered))>
                            "Adicionar cliente"
                        </button>
                        <button class="btn-secondary" on:click=move |_| source.set(Some(ClientSource::New))>
                            "Criar novo cliente"
                        </button>
                    </div>
                    <div class="form-group">
                        <label for="client-name">"Nome do cliente"</label>
                        <input
                            id="client-name"
                            type="text"
                            prop:value=move || name.get()
                            on:input=move |ev| name.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label for="client-external-id">"Código externo"</label>
                        <input
                            id="client-external-id"
                            type="text"
                            prop:value=move || external_id.get()
                            on:input=move |ev| external_id.set(event_target_value(&ev))
                        />
                    </div>
                </div>
                <div class="modal__footer">
                    <button class="btn-secondary" on:click=move |_| on_close.run(())>"Cancelar"</button>
                    <button class="btn-primary" on:click=save>"Salvar"</button>
                </div>
            </div>
        </div>
        {move || match source.get() {
            Some(ClientSource::Registered) => view! {
                <ClientPickerModal
                    initial_selected_id=selected_id.clone()
                    on_apply=on_client
                    on_close=close_source
                />
            }
            .into_any(),
            Some(ClientSource::New) => view! {
                <NewClientModal on_created=on_created on_close=close_source />
            }
            .into_any(),
            None => ().into_any(),
        }}
    }
}

#[component]
pub fn VideoLinkModal(vm: ComparisonEditViewModel, on_close: Callback<()>) -> impl IntoView {
    let input = RwSignal::new(
        vm.state
            .with_untracked(|s| s.header.presentation_video_url.clone()),
    );
    let error = RwSignal::new(Option::<String>::None);

    let save = move |_| match vm.set_video_link(&input.get_untracked()) {
        Ok(()) => {
            error.set(None);
            on_close.run(());
        }
        Err(message) => error.set(Some(message)),
    };

    view! {
        <div class="modal-overlay" on:click=move |_| on_close.run(())>
            <div class="modal" on:click=|ev| ev.stop_propagation()>
                <div class="modal__header">
                    <h3>"Vídeo da apresentação"</h3>
                </div>
                <div class="modal__body">
                    <div class="form-group">
                        <label for="video-link">"Link do vídeo"</label>
                        <input
                            id="video-link"
                            type="url"
                            placeholder="https://"
                            prop:value=move || input.get()
                            on:input=move |ev| input.set(event_target_value(&ev))
                        />
                    </div>
                    {move || error.get().map(|e| view! { <p class="error">{e}</p> })}
                </div>
                <div class="modal__footer">
                    <button class="btn-secondary" on:click=move |_| on_close.run(())>"Cancelar"</button>
                    <button class="btn-primary" on:click=save>"Salvar"</button>
                </div>
            </div>
        </div>
    }
}
