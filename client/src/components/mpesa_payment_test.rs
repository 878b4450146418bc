use super::*;

#[test]
fn pay_button_label_formats_amount() {
    assert_eq!(pay_button_label(2400.0), "Pay KES 2,400.00 with M-Pesa");
}

#[test]
fn connectivity_hint_needs_repeated_failures_while_waiting() {
    let mut flow = PaymentFlow::default();
    flow.apply(PaymentEvent::Submitted { phone_number: "254712345678".to_owned() });
    flow.apply(PaymentEvent::Initiated { payment_id: "p1".to_owned(), checkout_request_id: None });
    for _ in 0..POLL_FAILURE_HINT_THRESHOLD - 1 {
        flow.apply(PaymentEvent::PollFailed { message: "offline".to_owned() });
    }
    assert!(!show_connectivity_hint(&flow));

    flow.apply(PaymentEvent::PollFailed { message: "offline".to_owned() });
    assert!(show_connectivity_hint(&flow));

    flow.apply(PaymentEvent::TimedOut);
    assert!(!show_connectivity_hint(&flow));
}

#[test]
fn auto_reset_clears_phone_and_code() {
    assert_eq!(form_reset_for(&PaymentEvent::AutoReset), FormReset { phone: true, code: true });
}

#[test]
fn try_again_keeps_phone_but_clears_code() {
    assert_eq!(form_reset_for(&PaymentEvent::TryAgain), FormReset { phone: false, code: true });
}

#[test]
fn poll_events_leave_the_form_alone() {
    assert_eq!(form_reset_for(&PaymentEvent::StillPending), FormReset::default());
    assert_eq!(form_reset_for(&PaymentEvent::ManualVerifyFailed { message: "nope".to_owned() }), FormReset::default());
}
