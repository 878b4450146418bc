//! Sign-in page: email + password with an optional "remember me".

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::alert::Alert;
use crate::state::auth::AuthState;
use crate::state::remote::spawn_api;
use crate::util::auth::home_route_for;
use crate::util::validation::{required, validate_email};

/// Normalised `(email, password)` ready to submit.
///
/// # Errors
///
/// Returns the first inline message for a missing or malformed field.
pub fn validate_login_form(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = validate_email(email)?;
    required(password, "Password is required")?;
    Ok((email, password.to_owned()))
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let remember = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    // Already signed in (e.g. remembered session): go straight home.
    Effect::new(move || {
        let state = auth.get();
        if state.is_authenticated() {
            navigate(home_route_for(&state), NavigateOptions::default());
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let (email_value, password_value) =
            match validate_login_form(&email.get_untracked(), &password.get_untracked()) {
                Ok(values) => values,
                Err(msg) => {
                    error.set(Some(msg.to_owned()));
                    return;
                }
            };
        let remember_value = remember.get_untracked();
        busy.set(true);
        error.set(None);

        spawn_api(move |api| async move {
            match api.login(&email_value, &password_value, remember_value).await {
                Ok(user) => {
                    leptos::logging::log!("signed in as {}", user.email);
                    auth.update(|a| a.signed_in(user));
                }
                Err(e) => {
                    error.set(Some(e.to_string()));
                    busy.set(false);
                }
            }
        });
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Member Portal"</h1>
                <p class="auth-card__subtitle">"Sign in to manage your cover"</p>
                {move || error.get().map(|msg| view! { <Alert message=msg/> })}
                <form class="auth-form" on:submit=on_submit>
                    <label class="form-field">
                        "Email"
                        <input
                            class="form-field__input"
                            type="email"
                            autocomplete="email"
                            placeholder="you@example.com"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="form-field">
                        "Password"
                        <input
                            class="form-field__input"
                            type="password"
                            autocomplete="current-password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="form-field form-field--inline">
                        <input
                            type="checkbox"
                            prop:checked=move || remember.get()
                            on:change=move |ev| remember.set(event_target_checked(&ev))
                        />
                        "Remember me"
                    </label>
                    <button class="btn btn--primary btn--block" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
                <p class="auth-card__footer">
                    "New member? " <a href="/register">"Create an account"</a>
                </p>
            </div>
        </div>
    }
}
