//! Plan catalogue: frequency toggle, subscribe, then pay the first premium.
//!
//! SYSTEM CONTEXT
//! ==============
//! Public route (also served at `/`). Anonymous visitors can browse; choosing
//! a plan requires a session. A successful `POST /subscriptions` opens the
//! M-Pesa dialog for the first premium at the selected frequency.

#[cfg(test)]
#[path = "plans_test.rs"]
mod plans_test;

use leptos::prelude::*;

use crate::components::alert::Alert;
use crate::components::modal::Modal;
use crate::components::mpesa_payment::MpesaPayment;
use crate::components::nav_bar::NavBar;
use crate::components::plan_card::PlanCard;
use crate::net::http::redirect_to_login;
use crate::net::types::{Frequency, Plan, Subscription};
use crate::state::auth::AuthState;
use crate::state::remote::{Remote, load_into, spawn_api};

/// Plans members can subscribe to, in catalogue order.
#[must_use]
pub fn visible_plans(plans: &[Plan]) -> Vec<Plan> {
    plans.iter().filter(|p| p.is_active).cloned().collect()
}

/// Toggle button text, e.g. `Monthly`.
#[must_use]
pub fn frequency_label(frequency: Frequency) -> String {
    let raw = frequency.as_str();
    let mut chars = raw.chars();
    chars
        .next()
        .map(|first| first.to_ascii_uppercase().to_string() + chars.as_str())
        .unwrap_or_default()
}

/// Payment description shown on the member's M-Pesa prompt and history.
#[must_use]
pub fn premium_description(plan: &Plan, frequency: Frequency) -> String {
    format!("{} {} premium", plan.name, frequency.as_str())
}

/// A checkout in progress: the new subscription and the plan it is for.
#[derive(Clone, Debug, PartialEq)]
struct Checkout {
    subscription: Subscription,
    plan: Plan,
}

#[component]
pub fn PlansPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let plans = RwSignal::new(Remote::<Vec<Plan>>::Loading);
    let current = RwSignal::new(None::<Subscription>);
    let frequency = RwSignal::new(Frequency::default());
    let subscribing = RwSignal::new(false);
    let action_error = RwSignal::new(None::<String>);
    let checkout = RwSignal::new(None::<Checkout>);
    let paid_receipt = RwSignal::new(None::<String>);

    let reload = move || load_into(plans, |api| async move { api.plans().await });
    reload();

    // Existing subscription, once the session is known.
    Effect::new(move || {
        if !auth.with(AuthState::is_authenticated) {
            return;
        }
        spawn_api(move |api| async move {
            match api.my_subscription().await {
                Ok(sub) => current.set(sub),
                Err(e) => leptos::logging::warn!("subscription lookup failed: {e}"),
            }
        });
    });

    let on_select = Callback::new(move |plan: Plan| {
        if !auth.with_untracked(AuthState::is_authenticated) {
            redirect_to_login();
            return;
        }
        if subscribing.get_untracked() {
            return;
        }
        subscribing.set(true);
        action_error.set(None);
        let chosen = frequency.get_untracked();
        spawn_api(move |api| async move {
            match api.subscribe(&plan.id, chosen).await {
                Ok(subscription) => {
                    current.set(Some(subscription.clone()));
                    paid_receipt.set(None);
                    checkout.set(Some(Checkout { subscription, plan }));
                }
                Err(e) => action_error.set(Some(e.to_string())),
            }
            subscribing.set(false);
        });
    });

    let on_paid = Callback::new(move |receipt: String| paid_receipt.set(Some(receipt)));
    let on_close_checkout = Callback::new(move |()| checkout.set(None));

    view! {
        <NavBar/>
        <main class="page plans-page">
            <header class="page__header">
                <h1>"Choose your cover"</h1>
                <div class="segmented" role="group">
                    {Frequency::ALL
                        .into_iter()
                        .map(|f| {
                            view! {
                                <button
                                    class="segmented__option"
                                    class:segmented__option--active=move || frequency.get() == f
                                    on:click=move |_| frequency.set(f)
                                >
                                    {frequency_label(f)}
                                </button>
                            }
                        })
                        .collect::<Vec<_>>()}
                </div>
            </header>
            {move || action_error.get().map(|msg| view! { <Alert message=msg/> })}
            {move || match plans.get() {
                Remote::Loading => view! { <p>"Loading plans..."</p> }.into_any(),
                Remote::Failed(msg) => {
                    view! { <Alert message=msg on_retry=Callback::new(move |()| reload())/> }.into_any()
                }
                Remote::Ready(list) => {
                    let current_plan_id = current.with(|c| c.as_ref().map(|s| s.plan.id().to_owned()));
                    view! {
                        <div class="plan-grid">
                            {visible_plans(&list)
                                .into_iter()
                                .map(|plan| {
                                    let is_current = current_plan_id.as_deref() == Some(plan.id.as_str());
                                    view! {
                                        <PlanCard
                                            plan=plan
                                            frequency=frequency
                                            on_select=on_select
                                            current=is_current
                                            busy=subscribing
                                        />
                                    }
                                })
                                .collect::<Vec<_>>()}
                        </div>
                    }
                        .into_any()
                }
            }}
            {move || {
                checkout
                    .get()
                    .map(|Checkout { subscription, plan }| {
                        let amount = plan.premiums.for_frequency(subscription.frequency);
                        let description = premium_description(&plan, subscription.frequency);
                        view! {
                            <Modal title=format!("Pay for {}", plan.name) on_close=on_close_checkout>
                                <MpesaPayment
                                    amount=amount
                                    description=description
                                    subscription_id=subscription.id.clone()
                                    on_success=on_paid
                                />
                                {move || {
                                    paid_receipt
                                        .get()
                                        .map(|_| {
                                            view! {
                                                <p class="plans-page__next">
                                                    "You're covered. " <a href="/dashboard">"Go to your dashboard"</a>
                                                </p>
                                            }
                                        })
                                }}
                            </Modal>
                        }
                    })
            }}
        </main>
    }
}
