//! Upcoming premium due dates for the active subscription.

#[cfg(test)]
#[path = "payment_schedule_test.rs"]
mod payment_schedule_test;

use leptos::prelude::*;

use crate::net::types::Subscription;
use crate::util::format::{format_kes, format_naive_date};
use crate::util::schedule::upcoming_due_dates;

pub const UPCOMING_PAYMENTS: usize = 4;

/// `(due date, amount)` rows, empty when the next due date is unknown.
#[must_use]
pub fn schedule_rows(subscription: &Subscription, count: usize) -> Vec<(String, String)> {
    let Some(next) = subscription.next_payment_date else {
        return Vec::new();
    };
    let amount = subscription.premium().map_or_else(|| "-".to_owned(), format_kes);
    upcoming_due_dates(next.date_naive(), subscription.frequency, count)
        .into_iter()
        .map(|date| (format_naive_date(date), amount.clone()))
        .collect()
}

#[component]
pub fn PaymentSchedule(subscription: Subscription) -> impl IntoView {
    let rows = schedule_rows(&subscription, UPCOMING_PAYMENTS);

    view! {
        <section class="panel payment-schedule">
            <h3>"Upcoming payments"</h3>
            {if rows.is_empty() {
                view! { <p class="panel__empty">"No upcoming payments scheduled."</p> }.into_any()
            } else {
                view! {
                    <table class="table">
                        <thead>
                            <tr>
                                <th>"Due"</th>
                                <th>"Amount"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {rows
                                .into_iter()
                                .map(|(due, amount)| {
                                    view! {
                                        <tr>
                                            <td>{due}</td>
                                            <td>{amount}</td>
                                        </tr>
                                    }
                                })
                                .collect::<Vec<_>>()}
                        </tbody>
                    </table>
                }
                    .into_any()
            }}
        </section>
    }
}
