use crate::routes::routes::AppRoutes;
use crate::shared::api_client::ApiClient;
use crate::system::auth::context::AuthContext;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Auth context is created once and injected into the API client;
    // every page reaches both through context.
    let auth = AuthContext::restore();
    provide_context(auth);
    provide_context(ApiClient::from_config(auth));

    view! {
        <AppRoutes />
    }
}
