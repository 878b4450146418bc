//! Inline alert banner.

use leptos::prelude::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AlertKind {
    #[default]
    Error,
    Success,
    Info,
}

impl AlertKind {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Error => "alert alert--error",
            Self::Success => "alert alert--success",
            Self::Info => "alert alert--info",
        }
    }
}

/// Message banner with an optional "Try Again" action.
#[component]
pub fn Alert(
    #[prop(into)] message: String,
    #[prop(optional)] kind: AlertKind,
    #[prop(optional)] on_retry: Option<Callback<()>>,
) -> impl IntoView {
    view! {
        <div class=kind.class() role="alert">
            <span class="alert__message">{message}</span>
            {on_retry.map(|retry| {
                view! {
                    <button class="btn alert__retry" on:click=move |_| retry.run(())>
                        "Try Again"
                    </button>
                }
            })}
        </div>
    }
}
