//! Member self-registration.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::alert::Alert;
use crate::net::types::RegisterRequest;
use crate::state::auth::AuthState;
use crate::state::remote::spawn_api;
use crate::util::auth::MEMBER_HOME_ROUTE;
use crate::util::validation::{
    normalize_phone, required, validate_email, validate_national_id, validate_password, validate_password_match,
};

/// Raw registration form values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub id_number: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationForm {
    /// Validate in display order and build the request body.
    ///
    /// # Errors
    ///
    /// Returns the inline message for the first invalid field.
    pub fn to_request(&self) -> Result<RegisterRequest, &'static str> {
        let first_name = required(&self.first_name, "First name is required")?;
        let last_name = required(&self.last_name, "Last name is required")?;
        let email = validate_email(&self.email)?;
        let phone_number = normalize_phone(&self.phone_number)?;
        let id_number = validate_national_id(&self.id_number)?;
        validate_password(&self.password)?;
        validate_password_match(&self.password, &self.confirm_password)?;
        Ok(RegisterRequest {
            first_name,
            last_name,
            email,
            phone_number,
            id_number,
            password: self.password.clone(),
        })
    }
}

fn form_input(
    label: &'static str,
    input_type: &'static str,
    autocomplete: &'static str,
    form: RwSignal<RegistrationForm>,
    get: fn(&RegistrationForm) -> String,
    set: fn(&mut RegistrationForm, String),
) -> impl IntoView {
    view! {
        <label class="form-field">
            {label}
            <input
                class="form-field__input"
                type=input_type
                autocomplete=autocomplete
                prop:value=move || form.with(get)
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    form.update(|f| set(f, value));
                }
            />
        </label>
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();

    let form = RwSignal::new(RegistrationForm::default());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    Effect::new(move || {
        if auth.with(AuthState::is_authenticated) {
            navigate(MEMBER_HOME_ROUTE, NavigateOptions::default());
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let request = match form.with_untracked(RegistrationForm::to_request) {
            Ok(request) => request,
            Err(msg) => {
                error.set(Some(msg.to_owned()));
                return;
            }
        };
        busy.set(true);
        error.set(None);

        spawn_api(move |api| async move {
            match api.register(&request).await {
                Ok(user) => auth.update(|a| a.signed_in(user)),
                Err(e) => {
                    error.set(Some(e.to_string()));
                    busy.set(false);
                }
            }
        });
    };

    view! {
        <div class="auth-page">
            <div class="auth-card auth-card--wide">
                <h1>"Become a member"</h1>
                {move || error.get().map(|msg| view! { <Alert message=msg/> })}
                <form class="auth-form auth-form--grid" on:submit=on_submit>
                    {form_input("First name", "text", "given-name", form, |f| f.first_name.clone(), |f, v| f.first_name = v)}
                    {form_input("Last name", "text", "family-name", form, |f| f.last_name.clone(), |f, v| f.last_name = v)}
                    {form_input("Email", "email", "email", form, |f| f.email.clone(), |f, v| f.email = v)}
                    {form_input("M-Pesa phone", "tel", "tel", form, |f| f.phone_number.clone(), |f, v| f.phone_number = v)}
                    {form_input("National ID", "text", "off", form, |f| f.id_number.clone(), |f, v| f.id_number = v)}
                    {form_input("Password", "password", "new-password", form, |f| f.password.clone(), |f, v| f.password = v)}
                    {form_input(
                        "Confirm password",
                        "password",
                        "new-password",
                        form,
                        |f| f.confirm_password.clone(),
                        |f, v| f.confirm_password = v,
                    )}
                    <button class="btn btn--primary btn--block" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Creating account..." } else { "Create account" }}
                    </button>
                </form>
                <p class="auth-card__footer">
                    "Already a member? " <a href="/login">"Sign in"</a>
                </p>
            </div>
        </div>
    }
}
