pub mod left;
pub mod top_header;

use crate::system::auth::guard::RequireAuth;
use leptos::prelude::*;
use leptos_router::components::Outlet;
use top_header::TopHeader;

/// Main application shell.
///
/// ```text
/// +------------------------------------------+
/// |              TopHeader                    |
/// +------------------------------------------+
/// |  Sidebar  |           Content            |
/// +------------------------------------------+
/// ```
#[component]
pub fn Shell() -> impl IntoView {
    view! {
        <RequireAuth>
            <div class="app-layout">
                <TopHeader />
                <div class="app-body">
                    <left::Sidebar />
                    <main class="app-main">
                        <Outlet />
                    </main>
                </div>
            </div>
        </RequireAuth>
    }
}
