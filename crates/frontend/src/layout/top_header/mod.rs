//! TopHeader component - application top bar with the signed-in user.

use crate::shared::api_client::use_api;
use crate::system::auth::{api, guard::LOGIN_PATH};
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

#[component]
pub fn TopHeader() -> impl IntoView {
    let client = use_api();
    let auth = client.auth();
    let navigate = use_navigate();

    let logout = move |_| {
        api::logout(&client);
        navigate(LOGIN_PATH, Default::default());
    };

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <span class="top-header__title">"Comparador de Planos"</span>
            </div>
            <div class="top-header__actions">
                <span class="top-header__user">{move || auth.user_name()}</span>
                <button class="top-header__icon-btn" on:click=logout title="Sair">
                    "Sair"
                </button>
            </div>
        </div>
    }
}
