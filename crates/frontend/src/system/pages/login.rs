use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::shared::api_client::use_api;
use crate::system::auth::api;

pub const HOME_PATH: &str = "/app/comparisons";

#[component]
pub fn LoginPage() -> impl IntoView {
    let client = use_api();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error_message = RwSignal::new(Option::<String>::None);
    let is_loading = RwSignal::new(false);

    // Already signed in
    if client.auth().token().is_some() {
        navigate(HOME_PATH, Default::default());
    }

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if is_loading.get_untracked() {
            return;
        }

        let email_val = email.get_untracked().trim().to_string();
        let password_val = password.get_untracked();
        if email_val.is_empty() || password_val.is_empty() {
            error_message.set(Some("Informe e-mail e senha.".to_string()));
            return;
        }

        is_loading.set(true);
        error_message.set(None);

        let navigate = navigate.clone();
        spawn_local(async move {
            match api::login(&client, email_val, password_val).await {
                Ok(()) => {
                    log::info!("signed in");
                    navigate(HOME_PATH, Default::default());
                }
                Err(e) => error_message.set(Some(e.to_string())),
            }
            is_loading.set(false);
        });
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <h1>"Comparador"</h1>
                <h2>"Entrar"</h2>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="email">"E-mail"</label>
                        <input
                            type="email"
                            id="email"
                            autocomplete="username"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <div class="form-group">
                        <label for="password">"Senha"</label>
                        <input
                            type="password"
                            id="password"
                            autocomplete="current-password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <button
                        type="submit"
                        class="btn-primary"
                        disabled=move || is_loading.get()
                    >
                        {move || if is_loading.get() { "Entrando..." } else { "Entrar" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
