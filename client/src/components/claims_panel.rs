//! Member claims: history list and submission form.

#[cfg(test)]
#[path = "claims_panel_test.rs"]
mod claims_panel_test;

use leptos::prelude::*;

use crate::components::alert::{Alert, AlertKind};
use crate::net::types::{Claim, ClaimRequest};
use crate::state::remote::{Remote, load_into, spawn_api};
use crate::util::format::{format_kes, format_optional_date};
use crate::util::validation::{parse_amount, required};

/// # Errors
///
/// Returns an inline message for the first invalid field.
pub fn build_claim_request(category: &str, amount: &str, description: &str) -> Result<ClaimRequest, &'static str> {
    let category = required(category, "Choose a benefit category")?;
    let amount = parse_amount(amount)?;
    let description = required(description, "Describe what the claim is for")?;
    Ok(ClaimRequest { category, amount, description })
}

#[component]
pub fn ClaimsPanel(
    /// Benefit categories the member's plan covers.
    #[prop(into)]
    categories: Signal<Vec<String>>,
) -> impl IntoView {
    let claims = RwSignal::new(Remote::<Vec<Claim>>::Loading);
    let category = RwSignal::new(String::new());
    let amount = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let form_error = RwSignal::new(None::<String>);
    let submitted = RwSignal::new(false);
    let submitting = RwSignal::new(false);

    let reload = move || load_into(claims, |api| async move { api.claims().await });
    reload();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let request =
            match build_claim_request(&category.get_untracked(), &amount.get_untracked(), &description.get_untracked())
            {
                Ok(request) => request,
                Err(msg) => {
                    form_error.set(Some(msg.to_owned()));
                    return;
                }
            };
        form_error.set(None);
        submitted.set(false);
        submitting.set(true);
        spawn_api(move |api| async move {
            match api.submit_claim(&request).await {
                Ok(claim) => {
                    claims.update(|c| c.update_ready(|list| list.insert(0, claim)));
                    amount.set(String::new());
                    description.set(String::new());
                    submitted.set(true);
                }
                Err(e) => form_error.set(Some(e.to_string())),
            }
            submitting.set(false);
        });
    };

    view! {
        <section class="panel claims-panel">
            <h3>"Claims"</h3>
            <form class="claims-panel__form" on:submit=on_submit>
                <select class="form-field__input" on:change=move |ev| category.set(event_target_value(&ev))>
                    <option value="">"Benefit category..."</option>
                    {move || {
                        categories
                            .get()
                            .into_iter()
                            .map(|c| {
                                let label = c.replace('_', " ");
                                view! { <option value=c>{label}</option> }
                            })
                            .collect::<Vec<_>>()
                    }}
                </select>
                <input
                    class="form-field__input"
                    type="text"
                    inputmode="decimal"
                    placeholder="Amount (KES)"
                    prop:value=move || amount.get()
                    on:input=move |ev| amount.set(event_target_value(&ev))
                />
                <textarea
                    class="form-field__input"
                    placeholder="What is this claim for?"
                    prop:value=move || description.get()
                    on:input=move |ev| description.set(event_target_value(&ev))
                ></textarea>
                <button class="btn btn--primary" type="submit" disabled=move || submitting.get()>
                    "Submit claim"
                </button>
            </form>
            {move || form_error.get().map(|msg| view! { <p class="form-field__error">{msg}</p> })}
            <Show when=move || submitted.get()>
                <Alert kind=AlertKind::Success message="Claim submitted. We will review it shortly."/>
            </Show>
            {move || match claims.get() {
                Remote::Loading => view! { <p>"Loading claims..."</p> }.into_any(),
                Remote::Failed(msg) => {
                    view! { <Alert message=msg on_retry=Callback::new(move |()| reload())/> }.into_any()
                }
                Remote::Ready(list) if list.is_empty() => {
                    view! { <p class="panel__empty">"No claims submitted."</p> }.into_any()
                }
                Remote::Ready(list) => {
                    view! {
                        <table class="table">
                            <thead>
                                <tr>
                                    <th>"Submitted"</th>
                                    <th>"Category"</th>
                                    <th>"Amount"</th>
                                    <th>"Status"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {list
                                    .into_iter()
                                    .map(|claim| {
                                        view! {
                                            <tr>
                                                <td>{format_optional_date(claim.submitted_at.as_ref())}</td>
                                                <td>{claim.category.replace('_', " ")}</td>
                                                <td>{format_kes(claim.amount)}</td>
                                                <td>
                                                    <span class=format!(
                                                        "status-pill status-pill--{}",
                                                        claim.status.to_ascii_lowercase(),
                                                    )>{claim.status.clone()}</span>
                                                </td>
                                            </tr>
                                        }
                                    })
                                    .collect::<Vec<_>>()}
                            </tbody>
                        </table>
                    }
                        .into_any()
                }
            }}
        </section>
    }
}
