use crate::domain::a001_comparison::ui::create::ComparisonCreate;
use crate::domain::a001_comparison::ui::edit::ComparisonEdit;
use crate::domain::a001_comparison::ui::list::ComparisonList;
use crate::domain::a001_comparison::ui::presentation::PresentationPage;
use crate::domain::a003_reference::ui::ReferencePage;
use crate::layout::Shell;
use crate::system::pages::login::{LoginPage, HOME_PATH};
use leptos::prelude::*;
use leptos_router::components::{ParentRoute, Redirect, Route, Router, Routes};
use leptos_router::path;

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="page page--empty">
            <h2>"Página não encontrada"</h2>
            <a href=HOME_PATH>"Voltar aos comparativos"</a>
        </div>
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <Routes fallback=NotFound>
                <Route path=path!("/") view=|| view! { <Redirect path=HOME_PATH /> } />
                <Route path=path!("/app/login") view=LoginPage />
                <ParentRoute path=path!("/app") view=Shell>
                    <Route path=path!("") view=|| view! { <Redirect path=HOME_PATH /> } />
                    <Route path=path!("comparisons") view=ComparisonList />
                    <Route path=path!("comparisons/create") view=ComparisonCreate />
                    <Route path=path!("comparisons/:id/edit") view=ComparisonEdit />
                    <Route path=path!("reference") view=ReferencePage />
                </ParentRoute>
                <Route path=path!("/comparisons/:id/presentation") view=PresentationPage />
                <Route path=path!("/p/:id") view=PresentationPage />
            </Routes>
        </Router>
    }
}
