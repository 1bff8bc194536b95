pub mod model;

use crate::shared::api_client::use_api;
use crate::shared::number_format::{format_brl, format_primary_total};
use crate::shared::task::TaskSlot;
use contracts::domain::a001_comparison::dto::{PresentationData, PresentationPlan};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_params_map, use_query_map};

pub fn hero_title(data: &PresentationData, id: &str) -> String {
    match data.title.as_deref().map(str::trim) {
        Some(title) if !title.is_empty() => title.to_string(),
        _ => format!(
            "Comparação #{}",
            data.id
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| id.to_string())
        ),
    }
}

pub fn type_label(data: &PresentationData) -> String {
    data.plan_type
        .as_ref()
        .map(|t| t.display_name().to_string())
        .unwrap_or_default()
}

#[component]
fn PlanSlide(plan: PresentationPlan, #[prop(optional)] highlight: Option<&'static str>) -> impl IntoView {
    let PresentationPlan {
        name,
        operator,
        image_url,
        is_client_plan,
        is_featured,
        total,
        faixa_resumo,
        ..
    } = plan;

    view! {
        <article
            class="presentation-plan"
            class:presentation-plan--client=is_client_plan
            class:presentation-plan--featured=is_featured
        >
            {highlight.map(|h| view! { <div class="badge">{h}</div> })}
            <header class="presentation-plan__header">
                {image_url.map(|src| view! { <img src=src alt="" /> })}
                <div>
                    <h3>{name}</h3>
                    <p class="muted">{operator.unwrap_or_default()}</p>
                </div>
            </header>
            <div class="presentation-plan__total">{format_primary_total(total)}</div>
            <table class="presentation-plan__bands">
                <tbody>
                    {faixa_resumo
                        .into_iter()
                        .map(|faixa| {
                            view! {
                                <tr>
                                    <td>{if faixa.label.is_empty() { faixa.key } else { faixa.label }}</td>
                                    <td>{faixa.qty.map(|q| q.to_string()).unwrap_or_else(|| "-".to_string())}</td>
                                    <td>{faixa.subtotal.map(format_brl).unwrap_or_else(|| "-".to_string())}</td>
                                </tr>
                            }
                        })
                        .collect_view()}
                </tbody>
            </table>
        </article>
    }
}

/// Signed, client-facing view of a comparison
#[component]
pub fn PresentationPage() -> impl IntoView {
    let client = use_api();
    let params = use_params_map();
    let query = use_query_map();

    let data = RwSignal::new(Option::<PresentationData>::None);
    let error = RwSignal::new(Option::<String>::None);
    let loading = RwSignal::new(true);

    let requests = TaskSlot::new();

    let id = move || params.with(|p| p.get("id").unwrap_or_default());

    Effect::new(move |_| {
        let id = id();
        let signature = query.with(|q| q.get("signature"));
        let ticket = requests.arm();
        loading.set(true);
        error.set(None);
        spawn_local(async move {
            let result = model::fetch_public_presentation(&client, &id, signature.as_deref()).await;
            if !ticket.is_current() {
                return;
            }
            match result {
                Ok(d) => data.set(Some(d)),
                Err(e) => {
                    log::warn!("presentation {} unavailable: {}", id, e);
                    error.set(Some(e.to_string()));
                }
            }
            loading.set(false);
        });
    });

    view! {
        <div class="presentation-shell">
            {move || {
                if loading.get() {
                    return view! { <div class="muted">"Carregando..."</div> }.into_any();
                }
                if let Some(message) = error.get() {
                    return view! {
                        <div class="panel presentation-error">
                            <h2>"Erro"</h2>
                            <p>{message}</p>
                        </div>
                    }
                    .into_any();
                }
                let Some(d) = data.get() else {
                    return view! { <div class="panel"><p>"Sem dados."</p></div> }.into_any();
                };

                let title = hero_title(&d, &id());
                let type_label = type_label(&d);
                let client_plan = d.client_plan().cloned();
                let featured_plan = d.featured_plan().cloned();
                let PresentationData { region, modality, lives_range, plans, .. } = d;

                view! {
                    <section class="slide slide--hero">
                        <h1>{title}</h1>
                        <p class="hashtag">"Apresentação personalizada"</p>
                        <ul class="presentation-context">
                            {region.map(|r| view! { <li>"Região: " {r}</li> })}
                            {modality.map(|m| view! { <li>"Modalidade: " {m}</li> })}
                            {lives_range.map(|l| view! { <li>"Vidas: " {l}</li> })}
                            <li>"Tipo: " {type_label}</li>
                        </ul>
                    </section>

                    {(client_plan.is_some() || featured_plan.is_some()).then(|| view! {
                        <section class="slide slide--highlights">
                            {client_plan.map(|p| view! { <PlanSlide plan=p highlight="Plano atual" /> })}
                            {featured_plan.map(|p| view! { <PlanSlide plan=p highlight="Recomendado" /> })}
                        </section>
                    })}

                    <section class="slide slide--plans">
                        <h2>"Planos"</h2>
                        <div class="presentation-plans">
                            {plans
                                .into_iter()
                                .map(|p| view! { <PlanSlide plan=p /> })
                                .collect_view()}
                        </div>
                    </section>
                }
                .into_any()
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_hero_title_and_type_label() {
        let d: PresentationData = serde_json::from_value(json!({
            "id": 21, "title": "", "type": "PARC", "plans": []
        }))
        .unwrap();
        assert_eq!(hero_title(&d, "21"), "Comparação #21");
        assert_eq!(type_label(&d), "Parcial");

        let named: PresentationData =
            serde_json::from_value(json!({"title": "Empresa ABC", "type": "SEM"})).unwrap();
        assert_eq!(hero_title(&named, "3"), "Empresa ABC");
        assert_eq!(type_label(&named), "Sem Coparticipação");
    }
}
