//! Admin console: revenue analytics, payment list, and CSV export.

#[cfg(test)]
#[path = "admin_payments_test.rs"]
mod admin_payments_test;

use leptos::prelude::*;

use crate::components::alert::Alert;
use crate::components::payment_history::PaymentTable;
use crate::net::types::{Payment, PaymentAnalytics, PaymentStatus};
use crate::state::remote::{Remote, RequestSeq, load_into, load_latest_into};
use crate::util::csv::{download_csv, payments_csv};
use crate::util::format::{format_kes, format_percent};

/// Analytics windows offered in the range selector.
pub const ANALYTICS_WINDOWS: [u32; 3] = [7, 30, 90];

pub const DEFAULT_ANALYTICS_DAYS: u32 = 30;

/// Range selector value; anything unexpected falls back to the default window.
#[must_use]
pub fn parse_days(raw: &str) -> u32 {
    raw.parse::<u32>()
        .ok()
        .filter(|d| ANALYTICS_WINDOWS.contains(d))
        .unwrap_or(DEFAULT_ANALYTICS_DAYS)
}

/// `""` means every status.
#[must_use]
pub fn parse_status_filter(raw: &str) -> Option<PaymentStatus> {
    match raw {
        "completed" => Some(PaymentStatus::Completed),
        "pending" => Some(PaymentStatus::Pending),
        "failed" => Some(PaymentStatus::Failed),
        "timeout" => Some(PaymentStatus::Timeout),
        _ => None,
    }
}

/// Rows matching the status filter and a case-insensitive search over phone,
/// receipt, and description.
#[must_use]
pub fn filter_payments(payments: &[Payment], status: Option<PaymentStatus>, search: &str) -> Vec<Payment> {
    let needle = search.trim().to_lowercase();
    payments
        .iter()
        .filter(|p| status.is_none_or(|s| p.status == s))
        .filter(|p| {
            needle.is_empty()
                || p.phone_number.contains(&needle)
                || p.description.to_lowercase().contains(&needle)
                || p.mpesa_receipt_number.as_deref().is_some_and(|r| r.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

/// Export file name for the current filter.
#[must_use]
pub fn export_file_name(status: Option<PaymentStatus>) -> String {
    match status {
        Some(s) => format!("payments-{}.csv", s.as_str()),
        None => "payments.csv".to_owned(),
    }
}

#[component]
fn AnalyticsSummary(analytics: PaymentAnalytics) -> impl IntoView {
    let peak = analytics.daily.iter().map(|d| d.amount).fold(0.0_f64, f64::max);
    view! {
        <div class="stat-grid">
            <div class="stat">
                <span class="stat__label">"Revenue"</span>
                <span class="stat__value">{format_kes(analytics.total_revenue)}</span>
            </div>
            <div class="stat">
                <span class="stat__label">"Transactions"</span>
                <span class="stat__value">{analytics.total_transactions}</span>
            </div>
            <div class="stat">
                <span class="stat__label">"Success rate"</span>
                <span class="stat__value">{format_percent(analytics.success_rate())}</span>
            </div>
            <div class="stat">
                <span class="stat__label">"Failed / pending"</span>
                <span class="stat__value">
                    {format!("{} / {}", analytics.failed_transactions, analytics.pending_transactions)}
                </span>
            </div>
        </div>
        <div class="revenue-bars">
            {analytics
                .daily
                .into_iter()
                .map(|day| {
                    let height = if peak > 0.0 { day.amount * 100.0 / peak } else { 0.0 };
                    let title = format!("{}: {} ({} payments)", day.date, format_kes(day.amount), day.count);
                    view! { <div class="revenue-bars__bar" title=title style=format!("height: {height:.1}%")></div> }
                })
                .collect::<Vec<_>>()}
        </div>
    }
}

#[component]
pub fn AdminPayments() -> impl IntoView {
    let days = RwSignal::new(DEFAULT_ANALYTICS_DAYS);
    let analytics = RwSignal::new(Remote::<PaymentAnalytics>::Loading);
    let payments = RwSignal::new(Remote::<Vec<Payment>>::Loading);
    let status_filter = RwSignal::new(String::new());
    let search = RwSignal::new(String::new());

    let analytics_seq = StoredValue::new(RequestSeq::default());

    let reload_analytics = move || {
        let window = days.get_untracked();
        load_latest_into(analytics, analytics_seq, move |api| async move { api.payment_analytics(window).await });
    };
    let reload_payments = move || load_into(payments, |api| async move { api.admin_payments().await });
    reload_analytics();
    reload_payments();

    let visible = Memo::new(move |_| {
        let status = parse_status_filter(&status_filter.get());
        let term = search.get();
        payments.with(|p| p.ready().map(|list| filter_payments(list, status, &term)).unwrap_or_default())
    });

    let on_export = move |_| {
        let status = parse_status_filter(&status_filter.get_untracked());
        visible.with_untracked(|rows| download_csv(&export_file_name(status), &payments_csv(rows)));
    };

    view! {
        <section class="admin-payments">
            <div class="admin-toolbar">
                <select
                    class="form-field__input"
                    on:change=move |ev| {
                        days.set(parse_days(&event_target_value(&ev)));
                        reload_analytics();
                    }
                >
                    {ANALYTICS_WINDOWS
                        .into_iter()
                        .map(|d| {
                            view! {
                                <option value=d.to_string() selected=d == DEFAULT_ANALYTICS_DAYS>
                                    {format!("Last {d} days")}
                                </option>
                            }
                        })
                        .collect::<Vec<_>>()}
                </select>
            </div>
            {move || match analytics.get() {
                Remote::Loading => view! { <p>"Loading analytics..."</p> }.into_any(),
                Remote::Failed(msg) => {
                    view! { <Alert message=msg on_retry=Callback::new(move |()| reload_analytics())/> }.into_any()
                }
                Remote::Ready(a) => view! { <AnalyticsSummary analytics=a/> }.into_any(),
            }}
            <div class="admin-toolbar">
                <input
                    class="form-field__input"
                    type="search"
                    placeholder="Phone, receipt, or description"
                    prop:value=move || search.get()
                    on:input=move |ev| search.set(event_target_value(&ev))
                />
                <select class="form-field__input" on:change=move |ev| status_filter.set(event_target_value(&ev))>
                    <option value="">"All statuses"</option>
                    <option value="completed">"Completed"</option>
                    <option value="pending">"Pending"</option>
                    <option value="failed">"Failed"</option>
                    <option value="timeout">"Timed out"</option>
                </select>
                <button
                    class="btn"
                    disabled=move || visible.with(Vec::is_empty)
                    on:click=on_export
                >
                    "Export CSV"
                </button>
            </div>
            {move || match payments.get() {
                Remote::Loading => view! { <p>"Loading payments..."</p> }.into_any(),
                Remote::Failed(msg) => {
                    view! { <Alert message=msg on_retry=Callback::new(move |()| reload_payments())/> }.into_any()
                }
                Remote::Ready(_) => view! { <PaymentTable payments=visible.get() show_phone=true/> }.into_any(),
            }}
        </section>
    }
}
