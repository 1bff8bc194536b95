//! Operator tabs and the plan checklist of the active operator.

use super::view_model::ComparisonEditViewModel;
use contracts::domain::a001_comparison::dto::Operator;
use leptos::prelude::*;

#[component]
pub fn PlanPicker(vm: ComparisonEditViewModel) -> impl IntoView {
    let operators = {
        let data = vm.data;
        move || {
            data.with(|d| {
                d.as_ref()
                    .map(|d| d.operators.clone())
                    .unwrap_or_default()
            })
        }
    };

    let vm_tabs = vm.clone();
    let vm_plans = vm.clone();

    view! {
        <div class="plan-picker">
            <div class="plan-picker__operators">
                {move || {
                    operators()
                        .into_iter()
                        .map(|op: Operator| {
                            let vm = vm_tabs.clone();
                            let id = op.id.clone();
                            let is_active = {
                                let state = vm.state;
                                let id = id.clone();
                                move || state.with(|s| s.active_operator.as_ref() == Some(&id))
                            };
                            view! {
                                <button
                                    class="plan-picker__operator"
                                    class:plan-picker__operator--active=is_active
                                    on:click=move |_| vm.set_active_operator(id.clone())
                                >
                                    {op.logo.map(|src| view! { <img src=src alt="" /> })}
                                    <span>{op.name}</span>
                                </button>
                            }
                        })
                        .collect_view()
                }}
            </div>

            <ul class="plan-picker__plans">
                {move || {
                    let Some(operator_id) = vm_plans.state.with(|s| s.active_operator.clone()) else {
                        return view! { <li class="muted">"Selecione uma operadora."</li> }.into_any();
                    };
                    let plans = vm_plans.active_plans();
                    if plans.is_empty() {
                        return view! { <li class="muted">"Nenhum plano para esta operadora."</li> }
                            .into_any();
                    }
                    plans
                        .into_iter()
                        .map(|plan| {
                            let vm = vm_plans.clone();
                            let (op, plan_id) = (operator_id.clone(), plan.id.clone());
                            let checked = {
                                let state = vm.state;
                                let (op, plan_id) = (op.clone(), plan_id.clone());
                                move || state.with(|s| s.is_selected(&op, &plan_id))
                            };
                            view! {
                                <li class="plan-picker__plan">
                                    <label>
                                        <input
                                            type="checkbox"
                                            prop:checked=checked
                                            on:change=move |_| vm.toggle_selection(op.clone(), plan_id.clone())
                                        />
                                        {plan.image_url().map(|src| view! { <img src=src alt="" /> })}
                                        <span>{plan.name.clone()}</span>
                                    </label>
                                </li>
                            }
                        })
                        .collect_view()
                        .into_any()
                }}
            </ul>
        </div>
    }
}
