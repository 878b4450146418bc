//! Fetch-on-mount state for server-backed views.
//!
//! Every page renders the same three shapes (loading, inline error, data), so
//! the shape lives here and the spawn plumbing lives next to it.

#[cfg(test)]
#[path = "remote_test.rs"]
mod remote_test;

use std::future::Future;

use leptos::prelude::*;

use crate::net::error::ApiError;
use crate::net::http::PortalApi;

#[derive(Clone, Debug, PartialEq)]
pub enum Remote<T> {
    Loading,
    Failed(String),
    Ready(T),
}

impl<T> Default for Remote<T> {
    fn default() -> Self {
        Self::Loading
    }
}

impl<T> Remote<T> {
    #[must_use]
    pub fn from_result(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(e) => Self::Failed(e.to_string()),
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Mutate loaded data in place; no-op while loading or failed.
    pub fn update_ready(&mut self, f: impl FnOnce(&mut T)) {
        if let Self::Ready(value) = self {
            f(value);
        }
    }
}

/// Run `task` with a browser API client. No-op outside the browser.
pub fn spawn_api<F, Fut>(task: F)
where
    F: FnOnce(PortalApi) -> Fut + 'static,
    Fut: Future<Output = ()> + 'static,
{
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(task(PortalApi::browser()));
    #[cfg(not(feature = "hydrate"))]
    let _ = task;
}

/// Reset `target` to loading and fill it with the outcome of `fetch`.
pub fn load_into<T, F, Fut>(target: RwSignal<Remote<T>>, fetch: F)
where
    T: Send + Sync + 'static,
    F: FnOnce(PortalApi) -> Fut + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    target.set(Remote::Loading);
    spawn_api(move |api| async move {
        let result = fetch(api).await;
        target.set(Remote::from_result(result));
    });
}

/// Numbers requests so only the newest may publish its result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RequestSeq(u64);

impl RequestSeq {
    /// Start a request, superseding every earlier ticket.
    pub fn issue(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }

    #[must_use]
    pub fn is_current(self, ticket: u64) -> bool {
        self.0 == ticket
    }
}

/// Like [`load_into`], but a response that arrives after a newer request was
/// issued through `seq` is dropped.
pub fn load_latest_into<T, F, Fut>(target: RwSignal<Remote<T>>, seq: StoredValue<RequestSeq>, fetch: F)
where
    T: Send + Sync + 'static,
    F: FnOnce(PortalApi) -> Fut + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let mut ticket = 0;
    seq.update_value(|s| ticket = s.issue());
    target.set(Remote::Loading);
    spawn_api(move |api| async move {
        let result = fetch(api).await;
        if seq.try_with_value(|s| s.is_current(ticket)).unwrap_or(false) {
            target.set(Remote::from_result(result));
        }
    });
}
