//! Top navigation bar with role-aware links and logout.

use leptos::prelude::*;

use crate::net::http::redirect_to_login;
use crate::state::auth::AuthState;
use crate::state::remote::spawn_api;

#[component]
pub fn NavBar() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let logging_out = RwSignal::new(false);

    let on_logout = move |_| {
        if logging_out.get_untracked() {
            return;
        }
        logging_out.set(true);
        spawn_api(move |api| async move {
            api.logout().await;
            auth.update(AuthState::signed_out);
            logging_out.set(false);
            redirect_to_login();
        });
    };

    view! {
        <nav class="nav-bar">
            <a class="nav-bar__brand" href="/">
                "Member Portal"
            </a>
            <a class="nav-bar__link" href="/plans">
                "Plans"
            </a>
            <Show when=move || auth.get().is_authenticated()>
                <a class="nav-bar__link" href="/dashboard">
                    "Dashboard"
                </a>
            </Show>
            <Show when=move || auth.get().is_admin()>
                <a class="nav-bar__link" href="/admin">
                    "Admin"
                </a>
            </Show>
            <span class="nav-bar__spacer"></span>
            <Show
                when=move || auth.get().is_authenticated()
                fallback=move || {
                    view! {
                        <a class="nav-bar__link" href="/login">
                            "Sign In"
                        </a>
                        <a class="btn btn--primary" href="/register">
                            "Register"
                        </a>
                    }
                }
            >
                <span class="nav-bar__user">{move || auth.get().display_name()}</span>
                <button class="btn nav-bar__logout" disabled=move || logging_out.get() on:click=on_logout>
                    "Logout"
                </button>
            </Show>
        </nav>
    }
}
