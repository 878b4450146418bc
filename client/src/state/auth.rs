//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and user-aware components to coordinate login
//! redirects and role-dependent rendering. Provided as `RwSignal<AuthState>`
//! from `App`; the token pair itself lives in `util::storage::TokenStore`.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::http::{ApiClient, Transport};
use crate::net::types::{Role, User};
use crate::util::storage::KeyValueStorage;

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    /// True until the stored token has been checked against `/auth/me`.
    pub loading: bool,
}

impl AuthState {
    /// State at page load, before the stored session is resolved.
    #[must_use]
    pub fn initializing() -> Self {
        Self { user: None, loading: true }
    }

    pub fn signed_in(&mut self, user: User) {
        self.user = Some(user);
        self.loading = false;
    }

    pub fn signed_out(&mut self) {
        self.user = None;
        self.loading = false;
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.role == Role::Admin)
    }

    #[must_use]
    pub fn display_name(&self) -> String {
        self.user.as_ref().map(User::full_name).unwrap_or_default()
    }
}

/// Resolve the stored session at page load. `None` when no token is stored or
/// `/auth/me` rejects it.
pub async fn restore_session<T: Transport, S: KeyValueStorage>(api: &ApiClient<T, S>) -> Option<User> {
    api.tokens().access_token()?;
    match api.current_user().await {
        Ok(user) => Some(user),
        Err(e) => {
            leptos::logging::warn!("stored session rejected: {e}");
            None
        }
    }
}
