//! Selected plans: one card per selection with the three-mode breakdown,
//! the client / featured marks, a row menu and drag-and-drop reordering.

use super::view_model::{ComparisonEditViewModel, PlanRow};
use crate::shared::number_format::format_brl;
use contracts::domain::common::RefId;
use leptos::ev::{DragEvent, MouseEvent};
use leptos::prelude::*;

const DRAG_FORMAT: &str = "text/plain";

#[component]
pub fn PlansList(vm: ComparisonEditViewModel) -> impl IntoView {
    // Row menu is keyed by the selection itself, never by its position
    let menu_open = RwSignal::new(Option::<(RefId, RefId)>::None);
    let dragging = RwSignal::new(Option::<String>::None);
    let drag_over = RwSignal::new(Option::<String>::None);

    let vm_rows = vm.clone();
    view! {
        <div class="plans-list">
            {move || {
                let rows = vm_rows.plan_rows();
                if rows.is_empty() {
                    return view! {
                        <div class="muted plans-list__empty">
                            "Nenhum plano selecionado. Escolha uma operadora e marque os planos."
                        </div>
                    }
                    .into_any();
                }
                rows.into_iter()
                    .map(|row| {
                        view! {
                            <PlanCard
                                vm=vm_rows.clone()
                                row=row
                                menu_open=menu_open
                                dragging=dragging
                                drag_over=drag_over
                            />
                        }
                    })
                    .collect_view()
                    .into_any()
            }}
        </div>
    }
}

#[component]
fn PlanCard(
    vm: ComparisonEditViewModel,
    row: PlanRow,
    menu_open: RwSignal<Option<(RefId, RefId)>>,
    dragging: RwSignal<Option<String>>,
    drag_over: RwSignal<Option<String>>,
) -> impl IntoView {
    let identity = (row.operator_id.clone(), row.plan_id.clone());
    let sortable_id = row.sortable_id.clone();

    let on_drag_start = {
        let id = sortable_id.clone();
        move |ev: DragEvent| {
            if let Some(dt) = ev.data_transfer() {
                let _ = dt.set_data(DRAG_FORMAT, &id);
                dt.set_effect_allowed("move");
            }
            dragging.set(Some(id.clone()));
        }
    };
    let on_drag_over = {
        let id = sortable_id.clone();
        move |ev: DragEvent| {
            ev.prevent_default();
            if drag_over.get_untracked().as_deref() != Some(id.as_str()) {
                drag_over.set(Some(id.clone()));
            }
        }
    };
    // Exactly one reorder per drop
    let on_drop = {
        let id = sortable_id.clone();
        let vm = vm.clone();
        move |ev: DragEvent| {
            ev.prevent_default();
            let dragged = dragging
                .get_untracked()
                .or_else(|| ev.data_transfer().and_then(|dt| dt.get_data(DRAG_FORMAT).ok()));
            dragging.set(None);
            drag_over.set(None);
            if let Some(dragged) = dragged {
                vm.reorder_by_ids(&dragged, &id);
            }
        }
    };
    let on_drag_end = move |_: DragEvent| {
        dragging.set(None);
        drag_over.set(None);
    };

    let is_drag_target = {
        let id = sortable_id.clone();
        move || drag_over.get().as_deref() == Some(id.as_str())
    };
    let is_menu_open = {
        let identity = identity.clone();
        move || menu_open.get().as_ref() == Some(&identity)
    };
    let toggle_menu = {
        let identity = identity.clone();
        move |_: MouseEvent| {
            menu_open.update(|open| {
                *open = if open.as_ref() == Some(&identity) {
                    None
                } else {
                    Some(identity.clone())
                }
            })
        }
    };

    let (operator_id, plan_id) = identity;
    let mark_client = {
        let (vm, op, plan) = (vm.clone(), operator_id.clone(), plan_id.clone());
        move |_: MouseEvent| {
            vm.mark_client(&op, &plan);
            menu_open.set(None);
        }
    };
    let mark_featured = {
        let (vm, op, plan) = (vm.clone(), operator_id.clone(), plan_id.clone());
        move |_: MouseEvent| {
            vm.mark_featured(&op, &plan);
            menu_open.set(None);
        }
    };
    let show_network = {
        let (vm, plan) = (vm.clone(), plan_id.clone());
        move |_: MouseEvent| {
            vm.open_network(Some(plan.clone()));
            menu_open.set(None);
        }
    };
    let remove = {
        let (vm, op, plan) = (vm.clone(), operator_id.clone(), plan_id.clone());
        move |_: MouseEvent| {
            vm.remove_selection(&op, &plan);
            menu_open.set(None);
        }
    };

    let PlanRow {
        operator_name,
        plan_name,
        image_url,
        is_client_plan,
        is_featured,
        hospitals,
        breakdown,
        primary_total,
        band_lines,
        ..
    } = row;

    view! {
        <div
            class="plan-card"
            class:plan-card--client=is_client_plan
            class:plan-card--featured=is_featured
            class:plan-card--drag-over=is_drag_target
            draggable="true"
            on:dragstart=on_drag_start
            on:dragover=on_drag_over
            on:drop=on_drop
            on:dragend=on_drag_end
        >
            <div class="plan-card__header">
                <span class="plan-card__handle" title="Arraste para reordenar">"⋮⋮"</span>
                {image_url.map(|src| view! { <img class="plan-card__logo" src=src alt="" /> })}
                <div class="plan-card__title">
                    <strong>{plan_name}</strong>
                    <span class="muted">{operator_name}</span>
                </div>
                <div class="plan-card__badges">
                    {is_client_plan.then(|| view! { <span class="pill pill--client">"Plano atual"</span> })}
                    {is_featured.then(|| view! { <span class="pill pill--featured">"Destaque"</span> })}
                </div>
                <div class="plan-card__menu">
                    <button class="icon-btn" on:click=toggle_menu title="Ações">"⋯"</button>
                    <Show when=is_menu_open>
                        <ul class="dropdown">
                            <li><button on:click=mark_client.clone()>"Marcar como plano atual"</button></li>
                            <li><button on:click=mark_featured.clone()>"Marcar como destaque"</button></li>
                            <li><button on:click=show_network.clone()>"Ver rede credenciada"</button></li>
                            <li><button class="btn-danger" on:click=remove.clone()>"Remover"</button></li>
                        </ul>
                    </Show>
                </div>
            </div>

            <div class="plan-card__total">
                <span class="muted">"Total mensal"</span>
                <strong>{primary_total}</strong>
            </div>
            <div class="plan-card__network muted">{hospitals}</div>

            <div class="plan-card__breakdown">
                {breakdown
                    .into_iter()
                    .map(|(label, amount)| {
                        view! {
                            <div class="plan-card__mode">
                                <span class="muted">{label}</span>
                                <span>{amount}</span>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>

            {(!band_lines.is_empty())
                .then(|| {
                    view! {
                        <table class="plan-card__bands">
                            <tbody>
                                {band_lines
                                    .into_iter()
                                    .filter(|line| line.qty > 0)
                                    .map(|line| {
                                        view! {
                                            <tr>
                                                <td>{line.label}</td>
                                                <td>{line.qty}</td>
                                                <td>{format_brl(line.unit_price)}</td>
                                                <td>{format_brl(line.subtotal)}</td>
                                            </tr>
                                        }
                                    })
                                    .collect_view()}
                            </tbody>
                        </table>
                    }
                })}
        </div>
    }
}
