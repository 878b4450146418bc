//! Payment history table shared by the member dashboard and admin console.

use leptos::prelude::*;

use crate::net::types::Payment;
use crate::util::format::{format_kes, format_optional_date};

#[component]
pub fn PaymentTable(payments: Vec<Payment>, #[prop(optional)] show_phone: bool) -> impl IntoView {
    if payments.is_empty() {
        return view! { <p class="panel__empty">"No payments yet."</p> }.into_any();
    }

    view! {
        <table class="table payment-table">
            <thead>
                <tr>
                    <th>"Date"</th>
                    <th>"Description"</th>
                    {show_phone.then(|| view! { <th>"Phone"</th> })}
                    <th>"Amount"</th>
                    <th>"Status"</th>
                    <th>"Receipt"</th>
                </tr>
            </thead>
            <tbody>
                {payments
                    .into_iter()
                    .map(|p| {
                        let status = p.status.as_str();
                        view! {
                            <tr>
                                <td>{format_optional_date(p.created_at.as_ref())}</td>
                                <td>{p.description}</td>
                                {show_phone.then(|| view! { <td>{p.phone_number.clone()}</td> })}
                                <td>{format_kes(p.amount)}</td>
                                <td>
                                    <span class=format!("status-pill status-pill--{status}")>{status}</span>
                                </td>
                                <td>{p.mpesa_receipt_number.unwrap_or_else(|| "-".to_owned())}</td>
                            </tr>
                        }
                    })
                    .collect::<Vec<_>>()}
            </tbody>
        </table>
    }
        .into_any()
}
