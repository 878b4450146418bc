//! Admin console with one tab per management area.

#[cfg(test)]
#[path = "admin_test.rs"]
mod admin_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::admin_documents::AdminDocuments;
use crate::components::admin_health::AdminHealth;
use crate::components::admin_payments::AdminPayments;
use crate::components::admin_plans::AdminPlans;
use crate::components::admin_users::AdminUsers;
use crate::components::nav_bar::NavBar;
use crate::state::auth::AuthState;
use crate::util::auth::install_admin_redirect;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AdminTab {
    #[default]
    Users,
    Plans,
    Payments,
    Health,
    Documents,
}

impl AdminTab {
    pub const ALL: [AdminTab; 5] = [Self::Users, Self::Plans, Self::Payments, Self::Health, Self::Documents];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Users => "Users",
            Self::Plans => "Plans",
            Self::Payments => "Payments",
            Self::Health => "System health",
            Self::Documents => "Documents",
        }
    }
}

#[component]
pub fn AdminPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    install_admin_redirect(auth, use_navigate());
    let tab = RwSignal::new(AdminTab::default());

    view! {
        <Show
            when=move || auth.with(AuthState::is_admin)
            fallback=|| view! { <div class="page page--loading">"Loading..."</div> }
        >
            <NavBar/>
            <main class="page admin-page">
                <h1>"Admin console"</h1>
                <nav class="tabs" role="tablist">
                    {AdminTab::ALL
                        .into_iter()
                        .map(|t| {
                            view! {
                                <button
                                    class="tabs__tab"
                                    role="tab"
                                    class:tabs__tab--active=move || tab.get() == t
                                    on:click=move |_| tab.set(t)
                                >
                                    {t.label()}
                                </button>
                            }
                        })
                        .collect::<Vec<_>>()}
                </nav>
                {move || match tab.get() {
                    AdminTab::Users => view! { <AdminUsers/> }.into_any(),
                    AdminTab::Plans => view! { <AdminPlans/> }.into_any(),
                    AdminTab::Payments => view! { <AdminPayments/> }.into_any(),
                    AdminTab::Health => view! { <AdminHealth/> }.into_any(),
                    AdminTab::Documents => view! { <AdminDocuments/> }.into_any(),
                }}
            </main>
        </Show>
    }
}
