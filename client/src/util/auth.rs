//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components should apply identical unauthenticated and non-admin
//! redirect behavior.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::net::http::LOGIN_ROUTE;
use crate::state::auth::AuthState;

/// Where members land when they hit an admin-only route.
pub const MEMBER_HOME_ROUTE: &str = "/dashboard";

#[must_use]
pub fn should_redirect_unauth(state: &AuthState) -> bool {
    !state.loading && state.user.is_none()
}

#[must_use]
pub fn should_redirect_non_admin(state: &AuthState) -> bool {
    !state.loading && state.user.is_some() && !state.is_admin()
}

/// Landing route after a successful sign-in.
#[must_use]
pub fn home_route_for(state: &AuthState) -> &'static str {
    if state.is_admin() { "/admin" } else { MEMBER_HOME_ROUTE }
}

/// Redirect to `/login` whenever auth has loaded and no user is present.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if should_redirect_unauth(&auth.get()) {
            navigate(LOGIN_ROUTE, NavigateOptions::default());
        }
    });
}

/// Unauthenticated users go to `/login`; signed-in members go to their dashboard.
pub fn install_admin_redirect<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        let state = auth.get();
        if should_redirect_unauth(&state) {
            navigate(LOGIN_ROUTE, NavigateOptions::default());
        } else if should_redirect_non_admin(&state) {
            navigate(MEMBER_HOME_ROUTE, NavigateOptions::default());
        }
    });
}
