//! STK push initiation and settlement polling.
//!
//! SYSTEM CONTEXT
//! ==============
//! After the backend accepts an STK push, the browser polls
//! `/payments/{id}/status` every `interval` until the payment settles or the
//! client-side deadline passes. The loop never decides state itself: it emits
//! `PaymentEvent`s that the caller applies to a `PaymentFlow`.
//!
//! TIMING
//! ======
//! With the defaults (5 s interval, 60 s timeout) polls happen at 5, 10 ... 55 s
//! after entering `waiting`; the 60 s mark emits `TimedOut` without a request.
//! The loop is generic over `Timer` so tests drive it with a virtual clock.

#[cfg(test)]
#[path = "payment_poller_test.rs"]
mod payment_poller_test;

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use super::error::ApiError;
use super::http::{ApiClient, Transport};
use super::types::{
    InitiatePaymentRequest, InitiatePaymentResponse, PaymentStatus, PaymentStatusResponse, VerifyTransactionRequest,
};
use crate::state::payment::PaymentEvent;
use crate::util::storage::KeyValueStorage;
use crate::util::validation::normalize_transaction_code;

const DEFAULT_FAILURE_REASON: &str = "Payment failed. Please try again.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollConfig {
    pub interval: Duration,
    pub timeout: Duration,
    /// How long `success` stays on screen before the form resets.
    pub success_reset_delay: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            timeout: Duration::from_secs(60),
            success_reset_delay: Duration::from_secs(10),
        }
    }
}

/// Cancellation token shared between a widget and its running poll loop.
///
/// Cloning shares the flag. A `child` is also cancelled by its parent, so a
/// component can cancel every run it started with one call on unmount.
/// Once cancelled the loop issues no further requests and emits no further
/// events.
#[derive(Clone, Debug, Default)]
pub struct PollHandle {
    cancelled: Arc<AtomicBool>,
    parent: Option<Arc<AtomicBool>>,
}

impl PollHandle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn child(&self) -> Self {
        Self { cancelled: Arc::default(), parent: Some(self.cancelled.clone()) }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst) || self.parent.as_ref().is_some_and(|p| p.load(Ordering::SeqCst))
    }
}

/// Monotonic-enough clock plus async sleep.
pub trait Timer {
    fn now(&self) -> Duration;
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()>;
}

/// `Date.now()` + `setTimeout` in the browser; inert on the server.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTimer;

impl Timer for BrowserTimer {
    fn now(&self) -> Duration {
        #[cfg(feature = "hydrate")]
        {
            Duration::from_secs_f64(js_sys::Date::now() / 1000.0)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Duration::ZERO
        }
    }

    async fn sleep(&self, duration: Duration) {
        #[cfg(feature = "hydrate")]
        {
            gloo_timers::future::sleep(duration).await;
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = duration;
        }
    }
}

/// The three backend calls the payment widget needs.
pub trait PaymentGateway {
    fn initiate(
        &self,
        request: &InitiatePaymentRequest,
    ) -> impl Future<Output = Result<InitiatePaymentResponse, ApiError>>;
    fn status(&self, payment_id: &str) -> impl Future<Output = Result<PaymentStatusResponse, ApiError>>;
    fn verify(&self, request: &VerifyTransactionRequest) -> impl Future<Output = Result<PaymentStatusResponse, ApiError>>;
}

impl<T: Transport, S: KeyValueStorage> PaymentGateway for ApiClient<T, S> {
    async fn initiate(&self, request: &InitiatePaymentRequest) -> Result<InitiatePaymentResponse, ApiError> {
        self.initiate_payment(request).await
    }

    async fn status(&self, payment_id: &str) -> Result<PaymentStatusResponse, ApiError> {
        self.payment_status(payment_id).await
    }

    async fn verify(&self, request: &VerifyTransactionRequest) -> Result<PaymentStatusResponse, ApiError> {
        self.verify_transaction(request).await
    }
}

/// How a poll run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollExit {
    InitiateFailed,
    Completed,
    Failed,
    TimedOut,
    Cancelled,
}

/// Initiate an STK push and, on acceptance, poll it to completion.
///
/// The caller applies `PaymentEvent::Submitted` before calling this.
pub async fn drive_payment<G, C, F>(
    gateway: &G,
    timer: &C,
    config: PollConfig,
    handle: &PollHandle,
    request: &InitiatePaymentRequest,
    mut emit: F,
) -> PollExit
where
    G: PaymentGateway,
    C: Timer,
    F: FnMut(PaymentEvent),
{
    let initiated = gateway.initiate(request).await;
    if handle.is_cancelled() {
        return PollExit::Cancelled;
    }
    match initiated {
        Ok(InitiatePaymentResponse { payment_id, checkout_request_id }) => {
            emit(PaymentEvent::Initiated { payment_id: payment_id.clone(), checkout_request_id });
            run_payment_poll(gateway, timer, config, handle, &payment_id, emit).await
        }
        Err(e) => {
            emit(PaymentEvent::InitiateFailed { message: e.to_string() });
            PollExit::InitiateFailed
        }
    }
}

/// Poll an already-initiated payment until it settles, times out, or the
/// handle is cancelled.
pub async fn run_payment_poll<G, C, F>(
    gateway: &G,
    timer: &C,
    config: PollConfig,
    handle: &PollHandle,
    payment_id: &str,
    mut emit: F,
) -> PollExit
where
    G: PaymentGateway,
    C: Timer,
    F: FnMut(PaymentEvent),
{
    let deadline = timer.now() + config.timeout;

    loop {
        let now = timer.now();
        if now + config.interval >= deadline {
            timer.sleep(deadline.saturating_sub(now)).await;
            if handle.is_cancelled() {
                return PollExit::Cancelled;
            }
            leptos::logging::log!("payment {payment_id}: no terminal status before deadline");
            emit(PaymentEvent::TimedOut);
            return PollExit::TimedOut;
        }

        timer.sleep(config.interval).await;
        if handle.is_cancelled() {
            return PollExit::Cancelled;
        }

        let polled = gateway.status(payment_id).await;
        if handle.is_cancelled() {
            return PollExit::Cancelled;
        }

        match polled {
            Ok(resp) => match resp.status {
                PaymentStatus::Completed => {
                    emit(PaymentEvent::Completed { receipt: resp.mpesa_receipt_number });
                    reset_after_success(timer, config, handle, emit).await;
                    return PollExit::Completed;
                }
                PaymentStatus::Failed => {
                    let reason = resp.result_desc.unwrap_or_else(|| DEFAULT_FAILURE_REASON.to_owned());
                    emit(PaymentEvent::Failed { reason });
                    return PollExit::Failed;
                }
                _ => emit(PaymentEvent::StillPending),
            },
            Err(e) => emit(PaymentEvent::PollFailed { message: e.to_string() }),
        }
    }
}

/// Hold `success` on screen for the configured delay, then reset the form.
pub async fn reset_after_success<C, F>(timer: &C, config: PollConfig, handle: &PollHandle, mut emit: F)
where
    C: Timer,
    F: FnMut(PaymentEvent),
{
    timer.sleep(config.success_reset_delay).await;
    if !handle.is_cancelled() {
        emit(PaymentEvent::AutoReset);
    }
}

/// Confirm a timed-out payment with the receipt code the user received by SMS.
///
/// Returns the event to apply; the caller applies `ManualVerifyStarted` first.
pub async fn verify_manually<G: PaymentGateway>(gateway: &G, payment_id: &str, raw_code: &str) -> PaymentEvent {
    let transaction_code = match normalize_transaction_code(raw_code) {
        Ok(code) => code,
        Err(message) => return PaymentEvent::ManualVerifyFailed { message: message.to_owned() },
    };
    let request = VerifyTransactionRequest { payment_id: payment_id.to_owned(), transaction_code: transaction_code.clone() };

    match gateway.verify(&request).await {
        Ok(resp) if resp.status == PaymentStatus::Completed => {
            PaymentEvent::ManualVerified { receipt: resp.mpesa_receipt_number.unwrap_or(transaction_code) }
        }
        Ok(resp) => PaymentEvent::ManualVerifyFailed {
            message: resp
                .result_desc
                .unwrap_or_else(|| "We could not confirm that transaction code.".to_owned()),
        },
        Err(e) => PaymentEvent::ManualVerifyFailed { message: e.to_string() },
    }
}
