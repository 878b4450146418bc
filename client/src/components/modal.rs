//! Modal dialog wrapper.
//!
//! Clicking the backdrop closes the dialog; clicks inside are contained.

use leptos::prelude::*;

#[component]
pub fn Modal(#[prop(into)] title: String, on_close: Callback<()>, children: Children) -> impl IntoView {
    view! {
        <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
            <div class="dialog" role="dialog" aria-modal="true" on:click=move |ev| ev.stop_propagation()>
                <header class="dialog__header">
                    <h2>{title}</h2>
                    <button class="dialog__close" title="Close" aria-label="Close" on:click=move |_| on_close.run(())>
                        "✕"
                    </button>
                </header>
                {children()}
            </div>
        </div>
    }
}
