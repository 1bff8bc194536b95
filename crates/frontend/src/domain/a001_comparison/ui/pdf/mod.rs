pub mod model;
pub mod view_model;

use crate::shared::date_utils::format_datetime;
use leptos::prelude::*;
pub use view_model::{EmailStatus, PdfStatus, PdfViewModel};

#[component]
pub fn PdfModal(vm: PdfViewModel, on_close: Callback<()>) -> impl IntoView {
    let email_open = RwSignal::new(false);

    let status = vm.status;
    let feedback = vm.feedback;
    let vm_link = vm.clone();
    let vm_actions = vm.clone();
    let vm_email = vm.clone();

    let timestamps = {
        let info = vm.info;
        move || {
            info.get().map(|i| {
                let created = i.created_at.as_deref().map(format_datetime);
                let expires = i.expires_at.as_deref().map(format_datetime);
                view! {
                    <div class="pdf-modal__timestamps">
                        {created.map(|c| view! { <span>"Gerado em " {c}</span> })}
                        {expires.map(|e| view! { <span>"Expira em " {e}</span> })}
                        {i.already_existed.then(|| view! {
                            <span class="pdf-modal__status-note">"PDF reaproveitado (mesma assinatura)."</span>
                        })}
                    </div>
                }
            })
        }
    };

    view! {
        <div class="modal-overlay" on:click=move |_| on_close.run(())>
            <div class="modal pdf-modal" on:click=|ev| ev.stop_propagation()>
                <div class="modal__header">
                    <h3>"Gerar PDF do Comparativo"</h3>
                    <button class="modal__close" on:click=move |_| on_close.run(())>"×"</button>
                </div>

                <div class=move || format!("pdf-modal__status pdf-modal__status--{}", status.with(PdfStatus::css_modifier))>
                    <strong>{move || status.with(PdfStatus::headline)}</strong>
                    {move || match status.get() {
                        PdfStatus::Error(message) => Some(view! { <p class="pdf-modal__status-error">{message}</p> }),
                        _ => None,
                    }}
                    {timestamps}
                </div>

                <div class="pdf-modal__link-row">
                    <input
                        type="text"
                        readonly
                        placeholder="Aguarde enquanto o PDF é gerado..."
                        prop:value=move || vm_link.link()
                    />
                </div>
                {move || feedback.get().map(|f| view! { <p class="pdf-modal__feedback">{f}</p> })}

                <div class="pdf-modal__actions">
                    {
                        let vm = vm_actions.clone();
                        let busy = move || status.with(|s| *s == PdfStatus::Loading);
                        let no_link = {
                            let vm = vm.clone();
                            move || vm.link().is_empty()
                        };
                        let (copy, share, download, regenerate) =
                            (vm.clone(), vm.clone(), vm.clone(), vm);
                        view! {
                            <button class="btn-secondary" disabled=no_link.clone() on:click=move |_| copy.copy_link()>
                                "Copiar link"
                            </button>
                            <button class="btn-secondary" disabled=no_link.clone() on:click=move |_| share.share_link()>
                                "Compartilhar"
                            </button>
                            <button class="btn-secondary" disabled=no_link.clone() on:click=move |_| download.download()>
                                "Baixar"
                            </button>
                            <button class="btn-secondary" disabled=no_link on:click=move |_| email_open.update(|o| *o = !*o)>
                                "Enviar por e-mail"
                            </button>
                            <button class="btn-primary" disabled=busy on:click=move |_| regenerate.generate(true)>
                                "Gerar novamente"
                            </button>
                        }
                    }
                </div>

                <Show when=move || email_open.get()>
                    {
                        let send = vm_email.clone();
                        let email_to = vm_email.email_to;
                        let email_message = vm_email.email_message;
                        let email_status = vm_email.email_status;
                        let email_error = vm_email.email_error;
                        view! {
                            <div class="pdf-modal__email">
                                <div class="form-group">
                                    <label for="pdf-email-to">"Para"</label>
                                    <input
                                        id="pdf-email-to"
                                        type="email"
                                        prop:value=move || email_to.get()
                                        on:input=move |ev| email_to.set(event_target_value(&ev))
                                    />
                                </div>
                                <div class="form-group">
                                    <label for="pdf-email-message">"Mensagem"</label>
                                    <textarea
                                        id="pdf-email-message"
                                        rows="4"
                                        prop:value=move || email_message.get()
                                        on:input=move |ev| email_message.set(event_target_value(&ev))
                                    ></textarea>
                                </div>
                                {move || email_error.get().map(|e| view! { <p class="error">{e}</p> })}
                                {move || (email_status.get() == EmailStatus::Sent)
                                    .then(|| view! { <p class="pdf-modal__feedback">"E-mail enviado."</p> })}
                                <button
                                    class="btn-primary"
                                    disabled=move || email_status.get() == EmailStatus::Sending
                                    on:click=move |_| send.send_email()
                                >
                                    {move || if email_status.get() == EmailStatus::Sending { "Enviando..." } else { "Enviar" }}
                                </button>
                            </div>
                        }
                    }
                </Show>
            </div>
        </div>
    }
}
