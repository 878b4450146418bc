//! M-Pesa payment flow state.
//!
//! SYSTEM CONTEXT
//! ==============
//! `idle → processing → waiting → {success | error | timeout}`. The async
//! driver in `net::payment_poller` produces `PaymentEvent`s; this module only
//! decides which events are legal in which phase. Terminal phases ignore
//! late poll events, so a completed payment can never fall back to waiting.

#[cfg(test)]
#[path = "payment_test.rs"]
mod payment_test;

/// Phase of the payment widget.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PaymentPhase {
    #[default]
    Idle,
    /// STK push is being initiated.
    Processing,
    /// STK push sent; polling for settlement.
    Waiting,
    Success,
    Error,
    /// No terminal status within the client-side deadline.
    Timeout,
}

impl PaymentPhase {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::Error | Self::Timeout)
    }

    #[must_use]
    pub fn is_busy(self) -> bool {
        matches!(self, Self::Processing | Self::Waiting)
    }
}

/// Inputs to the flow, from the user or from the poller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PaymentEvent {
    /// User submitted a valid, normalised phone number.
    Submitted { phone_number: String },
    Initiated { payment_id: String, checkout_request_id: Option<String> },
    InitiateFailed { message: String },
    /// Status endpoint answered with a non-terminal status.
    StillPending,
    Completed { receipt: Option<String> },
    Failed { reason: String },
    /// A status poll failed in transit; polling continues.
    PollFailed { message: String },
    TimedOut,
    /// Display delay after success elapsed.
    AutoReset,
    /// "Try Again" from `error` or `timeout`.
    TryAgain,
    ManualVerifyStarted,
    ManualVerified { receipt: String },
    ManualVerifyFailed { message: String },
}

/// Local state of one payment widget.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PaymentFlow {
    pub phase: PaymentPhase,
    pub phone_number: String,
    pub payment_id: Option<String>,
    pub checkout_request_id: Option<String>,
    pub receipt: Option<String>,
    pub error: Option<String>,
    /// Consecutive failed polls while waiting; shown as a connectivity hint.
    pub poll_failures: u32,
    pub verifying: bool,
}

impl PaymentFlow {
    /// Apply an event. Returns `false` when the event is not legal in the
    /// current phase and was ignored.
    pub fn apply(&mut self, event: PaymentEvent) -> bool {
        use PaymentEvent as E;
        use PaymentPhase as P;

        match (self.phase, event) {
            (P::Idle, E::Submitted { phone_number }) => {
                *self = Self { phase: P::Processing, phone_number, ..Self::default() };
            }
            (P::Processing, E::Initiated { payment_id, checkout_request_id }) => {
                self.phase = P::Waiting;
                self.payment_id = Some(payment_id);
                self.checkout_request_id = checkout_request_id;
            }
            (P::Processing, E::InitiateFailed { message }) => {
                self.phase = P::Error;
                self.error = Some(message);
            }
            (P::Waiting, E::StillPending) => {
                self.poll_failures = 0;
            }
            (P::Waiting, E::PollFailed { message }) => {
                self.poll_failures += 1;
                leptos::logging::warn!("payment status poll failed ({}): {message}", self.poll_failures);
            }
            (P::Waiting, E::Completed { receipt }) => {
                self.phase = P::Success;
                self.receipt = receipt;
                self.poll_failures = 0;
            }
            (P::Waiting, E::Failed { reason }) => {
                self.phase = P::Error;
                self.error = Some(reason);
            }
            (P::Waiting, E::TimedOut) => {
                self.phase = P::Timeout;
            }
            (P::Success, E::AutoReset) => {
                *self = Self::default();
            }
            (P::Error | P::Timeout, E::TryAgain) => {
                let phone_number = std::mem::take(&mut self.phone_number);
                *self = Self { phone_number, ..Self::default() };
            }
            (P::Timeout, E::ManualVerifyStarted) if !self.verifying => {
                self.verifying = true;
                self.error = None;
            }
            (P::Timeout, E::ManualVerified { receipt }) if self.verifying => {
                self.phase = P::Success;
                self.receipt = Some(receipt);
                self.verifying = false;
            }
            (P::Timeout, E::ManualVerifyFailed { message }) if self.verifying => {
                self.verifying = false;
                self.error = Some(message);
            }
            _ => return false,
        }
        true
    }

    /// Headline shown for the current phase.
    #[must_use]
    pub fn status_message(&self) -> String {
        match self.phase {
            PaymentPhase::Idle => "Enter your M-Pesa phone number to pay.".to_owned(),
            PaymentPhase::Processing => "Sending payment request to your phone...".to_owned(),
            PaymentPhase::Waiting => {
                "Check your phone and enter your M-Pesa PIN to complete the payment.".to_owned()
            }
            PaymentPhase::Success => match &self.receipt {
                Some(receipt) => format!("Payment received. M-Pesa receipt: {receipt}"),
                None => "Payment received.".to_owned(),
            },
            PaymentPhase::Error => self.error.clone().unwrap_or_else(|| "Payment failed.".to_owned()),
            PaymentPhase::Timeout => {
                "We did not get a confirmation in time. If you completed the payment, enter the M-Pesa \
                 transaction code below."
                    .to_owned()
            }
        }
    }
}
