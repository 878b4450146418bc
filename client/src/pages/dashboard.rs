//! Member dashboard: subscription, coverage, schedule, payments, documents,
//! and claims.
//!
//! SYSTEM CONTEXT
//! ==============
//! Members-only route. Data is fetched once the stored session has been
//! resolved, and each section renders its own loading/error/data states so a
//! slow endpoint never blanks the whole page.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::alert::Alert;
use crate::components::claims_panel::ClaimsPanel;
use crate::components::coverage_meter::CoverageMeter;
use crate::components::document_panel::DocumentPanel;
use crate::components::modal::Modal;
use crate::components::mpesa_payment::MpesaPayment;
use crate::components::nav_bar::NavBar;
use crate::components::payment_history::PaymentTable;
use crate::components::payment_schedule::PaymentSchedule;
use crate::net::types::{CoverageUsage, Payment, Subscription};
use crate::state::auth::AuthState;
use crate::state::remote::{Remote, load_into};
use crate::util::auth::install_unauth_redirect;
use crate::util::format::{format_kes, format_optional_date};

/// Plan name for the summary card; falls back when the plan is not embedded.
#[must_use]
pub fn plan_name(subscription: &Subscription) -> String {
    subscription
        .plan
        .plan()
        .map_or_else(|| "Your plan".to_owned(), |p| p.name.clone())
}

/// Claimable categories are the ones the member has cover for.
#[must_use]
pub fn claim_categories(coverage: &[CoverageUsage]) -> Vec<String> {
    coverage.iter().map(|c| c.category.clone()).collect()
}

/// Description attached to a "Pay now" premium payment.
#[must_use]
pub fn pay_now_description(subscription: &Subscription) -> String {
    format!("{} {} premium", plan_name(subscription), subscription.frequency.as_str())
}

#[component]
fn SubscriptionSummary(subscription: Subscription, on_pay: Callback<()>) -> impl IntoView {
    let premium = subscription.premium();
    view! {
        <div class="summary">
            <h2 class="summary__plan">{plan_name(&subscription)}</h2>
            <dl class="summary__facts">
                <dt>"Status"</dt>
                <dd>
                    <span class=format!(
                        "status-pill status-pill--{}",
                        if subscription.is_active() { "completed" } else { "pending" },
                    )>{subscription.status.clone()}</span>
                </dd>
                <dt>"Billing"</dt>
                <dd>{subscription.frequency.as_str()}</dd>
                <dt>"Premium"</dt>
                <dd>{premium.map_or_else(|| "-".to_owned(), format_kes)}</dd>
                <dt>"Next payment"</dt>
                <dd>{format_optional_date(subscription.next_payment_date.as_ref())}</dd>
            </dl>
            {premium
                .map(|_| {
                    view! {
                        <button class="btn btn--primary" on:click=move |_| on_pay.run(())>
                            "Pay now"
                        </button>
                    }
                })}
        </div>
        <PaymentSchedule subscription=subscription/>
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    install_unauth_redirect(auth, use_navigate());

    let subscription = RwSignal::new(Remote::<Option<Subscription>>::Loading);
    let coverage = RwSignal::new(Remote::<Vec<CoverageUsage>>::Loading);
    let payments = RwSignal::new(Remote::<Vec<Payment>>::Loading);
    let paying = RwSignal::new(false);

    let load_subscription = move || load_into(subscription, |api| async move { api.my_subscription().await });
    let load_coverage = move || load_into(coverage, |api| async move { api.coverage().await });
    let load_payments = move || load_into(payments, |api| async move { api.payment_history().await });

    let requested = RwSignal::new(false);
    Effect::new(move || {
        if requested.get_untracked() || !auth.with(AuthState::is_authenticated) {
            return;
        }
        requested.set(true);
        load_subscription();
        load_coverage();
        load_payments();
    });

    let on_pay = Callback::new(move |()| paying.set(true));
    let on_close_pay = Callback::new(move |()| paying.set(false));
    let on_paid = Callback::new(move |_receipt: String| {
        load_payments();
        load_subscription();
    });

    let categories = Signal::derive(move || {
        coverage.with(|c| c.ready().map(|list| claim_categories(list)).unwrap_or_default())
    });

    view! {
        <Show
            when=move || auth.with(AuthState::is_authenticated)
            fallback=|| view! { <div class="page page--loading">"Loading..."</div> }
        >
            <NavBar/>
            <main class="page dashboard-page">
                <h1>{move || format!("Welcome, {}", auth.with(AuthState::display_name))}</h1>
                <section class="panel">
                    <h2 class="panel__title">"Subscription"</h2>
                    {move || match subscription.get() {
                        Remote::Loading => view! { <p>"Loading subscription..."</p> }.into_any(),
                        Remote::Failed(msg) => {
                            view! { <Alert message=msg on_retry=Callback::new(move |()| load_subscription())/> }
                                .into_any()
                        }
                        Remote::Ready(None) => {
                            view! {
                                <p class="panel__empty">
                                    "You have no active cover. " <a href="/plans">"Browse plans"</a>
                                </p>
                            }
                                .into_any()
                        }
                        Remote::Ready(Some(sub)) => {
                            view! { <SubscriptionSummary subscription=sub on_pay=on_pay/> }.into_any()
                        }
                    }}
                </section>
                <section class="panel">
                    <h2 class="panel__title">"Coverage"</h2>
                    {move || match coverage.get() {
                        Remote::Loading => view! { <p>"Loading coverage..."</p> }.into_any(),
                        Remote::Failed(msg) => {
                            view! { <Alert message=msg on_retry=Callback::new(move |()| load_coverage())/> }
                                .into_any()
                        }
                        Remote::Ready(list) if list.is_empty() => {
                            view! { <p class="panel__empty">"No coverage limits on your plan."</p> }.into_any()
                        }
                        Remote::Ready(list) => {
                            view! {
                                <div class="coverage-list">
                                    {list
                                        .into_iter()
                                        .map(|usage| view! { <CoverageMeter usage=usage/> })
                                        .collect::<Vec<_>>()}
                                </div>
                            }
                                .into_any()
                        }
                    }}
                </section>
                <section class="panel">
                    <h2 class="panel__title">"Payment history"</h2>
                    {move || match payments.get() {
                        Remote::Loading => view! { <p>"Loading payments..."</p> }.into_any(),
                        Remote::Failed(msg) => {
                            view! { <Alert message=msg on_retry=Callback::new(move |()| load_payments())/> }
                                .into_any()
                        }
                        Remote::Ready(list) => view! { <PaymentTable payments=list/> }.into_any(),
                    }}
                </section>
                <DocumentPanel/>
                <ClaimsPanel categories=categories/>
            </main>
            {move || {
                let sub = subscription.with(|s| s.ready().cloned().flatten())?;
                let amount = sub.premium()?;
                paying
                    .get()
                    .then(|| {
                        view! {
                            <Modal title="Pay premium" on_close=on_close_pay>
                                <MpesaPayment
                                    amount=amount
                                    description=pay_now_description(&sub)
                                    subscription_id=sub.id.clone()
                                    on_success=on_paid
                                />
                            </Modal>
                        }
                    })
            }}
        </Show>
    }
}
