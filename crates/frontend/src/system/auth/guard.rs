use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::Redirect;

use super::{api, context::use_auth};
use crate::shared::api_client::use_api;

pub const LOGIN_PATH: &str = "/app/login";

/// Component that requires authentication
///
/// Without a token it redirects to the login page. With one, the current
/// user is loaded once; a 401 there means the token is stale and the
/// session is dropped.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let client = use_api();
    let checked = StoredValue::new(false);

    Effect::new(move |_| {
        if !auth.is_authenticated() || checked.get_value() {
            return;
        }
        checked.set_value(true);
        spawn_local(async move {
            match api::me(&client).await {
                Ok(user) => auth.set_user(user),
                Err(e) if e.is_unauthorized() => {
                    log::warn!("session expired: {}", e);
                    auth.logout();
                    checked.set_value(false);
                }
                Err(e) => log::warn!("failed to load current user: {}", e),
            }
        });
    });

    view! {
        <Show
            when=move || auth.is_authenticated()
            fallback=|| view! { <Redirect path=LOGIN_PATH /> }
        >
            {children()}
        </Show>
    }
}
