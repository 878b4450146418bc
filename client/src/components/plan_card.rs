//! Plan summary card used on the plans page.

#[cfg(test)]
#[path = "plan_card_test.rs"]
mod plan_card_test;

use leptos::prelude::*;

use crate::net::types::{Frequency, Plan};
use crate::util::format::format_kes;

/// `KES 2,400.00 / month`.
#[must_use]
pub fn premium_label(plan: &Plan, frequency: Frequency) -> String {
    format!("{} / {}", format_kes(plan.premiums.for_frequency(frequency)), frequency.per_label())
}

/// Coverage limits rendered as `(category, amount)` rows.
#[must_use]
pub fn coverage_rows(plan: &Plan) -> Vec<(String, String)> {
    plan.coverage_limits
        .iter()
        .map(|(category, limit)| (category.replace('_', " "), format_kes(*limit)))
        .collect()
}

#[component]
pub fn PlanCard(
    plan: Plan,
    #[prop(into)] frequency: Signal<Frequency>,
    on_select: Callback<Plan>,
    #[prop(optional)] current: bool,
    #[prop(into, optional)] busy: Signal<bool>,
) -> impl IntoView {
    let premium_plan = plan.clone();
    let select_plan = plan.clone();
    let benefits = plan.benefits.clone();
    let coverage = coverage_rows(&plan);

    view! {
        <article class="plan-card" class:plan-card--current=current>
            <header class="plan-card__header">
                <h3 class="plan-card__name">{plan.name.clone()}</h3>
                <span class="plan-card__category">{plan.category.clone()}</span>
            </header>
            <p class="plan-card__premium">{move || premium_label(&premium_plan, frequency.get())}</p>
            <p class="plan-card__description">{plan.description.clone()}</p>
            <ul class="plan-card__benefits">
                {benefits.into_iter().map(|b| view! { <li>{b}</li> }).collect::<Vec<_>>()}
            </ul>
            <dl class="plan-card__coverage">
                {coverage
                    .into_iter()
                    .map(|(category, limit)| {
                        view! {
                            <dt>{category}</dt>
                            <dd>{limit}</dd>
                        }
                    })
                    .collect::<Vec<_>>()}
            </dl>
            {if current {
                view! { <span class="plan-card__badge">"Current plan"</span> }.into_any()
            } else {
                view! {
                    <button
                        class="btn btn--primary plan-card__select"
                        disabled=move || busy.get()
                        on:click=move |_| on_select.run(select_plan.clone())
                    >
                        "Subscribe"
                    </button>
                }
                    .into_any()
            }}
        </article>
    }
}
