//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::pages::{
    admin::AdminPage, dashboard::DashboardPage, login::LoginPage, plans::PlansPage, register::RegisterPage,
};
use crate::state::auth::AuthState;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Resolve the stored token into `auth` once, in the browser.
fn restore_session_into(auth: RwSignal<AuthState>) {
    crate::state::remote::spawn_api(move |api| async move {
        match crate::state::auth::restore_session(&api).await {
            Some(user) => auth.update(|a| a.signed_in(user)),
            None => auth.update(AuthState::signed_out),
        }
    });
}

/// Root application component.
///
/// Provides the auth context and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::initializing());
    provide_context(auth);
    restore_session_into(auth);

    view! {
        <Stylesheet id="leptos" href="/pkg/portal.css"/>
        <Title text="Member Portal"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=PlansPage/>
                <Route path=StaticSegment("plans") view=PlansPage/>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("register") view=RegisterPage/>
                <Route path=StaticSegment("dashboard") view=DashboardPage/>
                <Route path=StaticSegment("admin") view=AdminPage/>
            </Routes>
        </Router>
    }
}
