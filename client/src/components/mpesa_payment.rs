//! M-Pesa STK push widget.
//!
//! SYSTEM CONTEXT
//! ==============
//! Owns one `PaymentFlow` signal and the `PollHandle` of its running poll
//! loop. Each run gets a child of a component-scoped handle: "Try Again"
//! cancels the run, unmount cancels the scope, so a poll that resolves after
//! the widget is gone never writes state.

#[cfg(test)]
#[path = "mpesa_payment_test.rs"]
mod mpesa_payment_test;

use leptos::prelude::*;

use crate::components::alert::{Alert, AlertKind};
use crate::net::payment_poller::{
    BrowserTimer, PollConfig, PollHandle, drive_payment, reset_after_success, verify_manually,
};
use crate::net::types::InitiatePaymentRequest;
use crate::state::payment::{PaymentEvent, PaymentFlow, PaymentPhase};
use crate::state::remote::spawn_api;
use crate::util::format::format_kes;
use crate::util::validation::normalize_phone;

/// Failed polls in a row before the widget hints at connectivity trouble.
pub const POLL_FAILURE_HINT_THRESHOLD: u32 = 3;

#[must_use]
pub fn pay_button_label(amount: f64) -> String {
    format!("Pay {} with M-Pesa", format_kes(amount))
}

#[must_use]
pub fn show_connectivity_hint(flow: &PaymentFlow) -> bool {
    flow.phase == PaymentPhase::Waiting && flow.poll_failures >= POLL_FAILURE_HINT_THRESHOLD
}

/// Form inputs to wipe once an event has been accepted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FormReset {
    pub phone: bool,
    pub code: bool,
}

/// Auto-reset returns to a blank form; "Try Again" keeps the phone number.
#[must_use]
pub fn form_reset_for(event: &PaymentEvent) -> FormReset {
    match event {
        PaymentEvent::AutoReset => FormReset { phone: true, code: true },
        PaymentEvent::TryAgain => FormReset { phone: false, code: true },
        _ => FormReset::default(),
    }
}

#[component]
pub fn MpesaPayment(
    amount: f64,
    #[prop(into)] description: String,
    #[prop(optional)] subscription_id: Option<String>,
    /// Runs once with the M-Pesa receipt when the payment settles.
    #[prop(optional)]
    on_success: Option<Callback<String>>,
) -> impl IntoView {
    let flow = RwSignal::new(PaymentFlow::default());
    let phone = RwSignal::new(String::new());
    let phone_error = RwSignal::new(None::<&'static str>);
    let code = RwSignal::new(String::new());
    let unmounted = PollHandle::new();
    let scope = StoredValue::new(unmounted.clone());
    let handle = StoredValue::new(unmounted.child());
    let meta = StoredValue::new((description, subscription_id));

    on_cleanup(move || unmounted.cancel());

    let apply = move |event: PaymentEvent| {
        let reset = form_reset_for(&event);
        let mut accepted = false;
        let mut settled = None;
        flow.update(|f| {
            let before = f.phase;
            accepted = f.apply(event);
            if accepted && before != PaymentPhase::Success && f.phase == PaymentPhase::Success {
                settled = Some(f.receipt.clone().unwrap_or_default());
            }
        });
        if accepted && reset.phone {
            phone.set(String::new());
            phone_error.set(None);
        }
        if accepted && reset.code {
            code.set(String::new());
        }
        if let (Some(receipt), Some(callback)) = (settled, on_success) {
            callback.run(receipt);
        }
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let phone_number = match normalize_phone(&phone.get_untracked()) {
            Ok(p) => p,
            Err(message) => {
                phone_error.set(Some(message));
                return;
            }
        };
        phone_error.set(None);

        let mut accepted = false;
        flow.update(|f| accepted = f.apply(PaymentEvent::Submitted { phone_number: phone_number.clone() }));
        if !accepted {
            return;
        }

        handle.with_value(PollHandle::cancel);
        let run = scope.with_value(PollHandle::child);
        handle.set_value(run.clone());

        let (description, subscription_id) = meta.get_value();
        let request = InitiatePaymentRequest { amount, phone_number, description, subscription_id };
        spawn_api(move |api| async move {
            drive_payment(&api, &BrowserTimer, PollConfig::default(), &run, &request, apply).await;
        });
    };

    let on_try_again = Callback::new(move |()| {
        handle.with_value(PollHandle::cancel);
        apply(PaymentEvent::TryAgain);
    });

    let on_verify = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(payment_id) = flow.get_untracked().payment_id else {
            return;
        };
        let mut started = false;
        flow.update(|f| started = f.apply(PaymentEvent::ManualVerifyStarted));
        if !started {
            return;
        }
        let raw_code = code.get_untracked();
        let run = handle.get_value();
        spawn_api(move |api| async move {
            let event = verify_manually(&api, &payment_id, &raw_code).await;
            if run.is_cancelled() {
                return;
            }
            let verified = matches!(event, PaymentEvent::ManualVerified { .. });
            apply(event);
            if verified {
                reset_after_success(&BrowserTimer, PollConfig::default(), &run, apply).await;
            }
        });
    };

    view! {
        <section class="mpesa-payment" aria-busy=move || flow.get().phase.is_busy().to_string()>
            <header class="mpesa-payment__header">
                <h3>"Pay with M-Pesa"</h3>
                <span class="mpesa-payment__amount">{format_kes(amount)}</span>
            </header>
            {move || {
                let state = flow.get();
                match state.phase {
                    PaymentPhase::Idle => {
                        view! {
                            <form class="mpesa-payment__form" on:submit=on_submit>
                                <label class="form-field">
                                    "M-Pesa phone number"
                                    <input
                                        class="form-field__input"
                                        type="tel"
                                        placeholder="0712 345 678"
                                        prop:value=move || phone.get()
                                        on:input=move |ev| phone.set(event_target_value(&ev))
                                    />
                                </label>
                                {move || phone_error.get().map(|msg| view! { <p class="form-field__error">{msg}</p> })}
                                <button class="btn btn--primary" type="submit">
                                    {pay_button_label(amount)}
                                </button>
                            </form>
                        }
                            .into_any()
                    }
                    PaymentPhase::Processing | PaymentPhase::Waiting => {
                        view! {
                            <div class="mpesa-payment__pending">
                                <span class="spinner" aria-hidden="true"></span>
                                <p>{state.status_message()}</p>
                                {show_connectivity_hint(&state)
                                    .then(|| {
                                        view! {
                                            <p class="mpesa-payment__hint">
                                                "Having trouble reaching the server. Still checking..."
                                            </p>
                                        }
                                    })}
                            </div>
                        }
                            .into_any()
                    }
                    PaymentPhase::Success => {
                        view! { <Alert kind=AlertKind::Success message=state.status_message()/> }.into_any()
                    }
                    PaymentPhase::Error => {
                        view! { <Alert message=state.status_message() on_retry=on_try_again/> }.into_any()
                    }
                    PaymentPhase::Timeout => {
                        view! {
                            <Alert kind=AlertKind::Info message=state.status_message() on_retry=on_try_again/>
                            <form class="mpesa-payment__verify" on:submit=on_verify>
                                <label class="form-field">
                                    "M-Pesa transaction code"
                                    <input
                                        class="form-field__input"
                                        type="text"
                                        placeholder="QWE123ABC4"
                                        prop:value=move || code.get()
                                        on:input=move |ev| code.set(event_target_value(&ev).to_ascii_uppercase())
                                    />
                                </label>
                                {state.error.clone().map(|msg| view! { <p class="form-field__error">{msg}</p> })}
                                <button class="btn" type="submit" disabled=state.verifying>
                                    {if state.verifying { "Verifying..." } else { "Verify payment" }}
                                </button>
                            </form>
                        }
                            .into_any()
                    }
                }
            }}
        </section>
    }
}
