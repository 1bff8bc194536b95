//! Sidebar navigation

use leptos::prelude::*;
use leptos_router::components::A;

struct MenuItem {
    href: &'static str,
    label: &'static str,
}

const MENU: &[MenuItem] = &[
    MenuItem {
        href: "/app/comparisons",
        label: "Comparativos",
    },
    MenuItem {
        href: "/app/comparisons/create",
        label: "Novo comparativo",
    },
    MenuItem {
        href: "/app/reference",
        label: "Referências",
    },
];

#[component]
pub fn Sidebar() -> impl IntoView {
    view! {
        <nav class="sidebar">
            <ul class="sidebar__menu">
                {MENU
                    .iter()
                    .map(|item| {
                        view! {
                            <li class="sidebar__item">
                                <A href=item.href>{item.label}</A>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </nav>
    }
}
