//! Admin console: backend health snapshot.

#[cfg(test)]
#[path = "admin_health_test.rs"]
mod admin_health_test;

use leptos::prelude::*;

use crate::components::alert::Alert;
use crate::net::types::{ServiceHealth, SystemHealth};
use crate::state::remote::{Remote, load_into};
use crate::util::format::{format_optional_date, format_uptime};

/// Pill modifier for a reported status string.
#[must_use]
pub fn status_class(status: &str) -> &'static str {
    match status.to_ascii_lowercase().as_str() {
        "ok" | "up" | "healthy" | "connected" => "status-pill--completed",
        "degraded" | "slow" | "warning" => "status-pill--pending",
        _ => "status-pill--failed",
    }
}

/// `"42 ms"` or a dash when the service reported no latency.
#[must_use]
pub fn latency_label(service: &ServiceHealth) -> String {
    service.latency_ms.map_or_else(|| "-".to_owned(), |ms| format!("{ms:.0} ms"))
}

#[component]
fn HealthReport(health: SystemHealth) -> impl IntoView {
    view! {
        <div class="health-summary">
            <span class=format!("status-pill {}", status_class(&health.status))>{health.status.clone()}</span>
            <span>{format!("Uptime {}", format_uptime(health.uptime_seconds))}</span>
            <span class="health-summary__checked">
                {format!("Checked {}", format_optional_date(health.checked_at.as_ref()))}
            </span>
        </div>
        <table class="table">
            <thead>
                <tr>
                    <th>"Service"</th>
                    <th>"Status"</th>
                    <th>"Latency"</th>
                    <th>"Details"</th>
                </tr>
            </thead>
            <tbody>
                {health
                    .services
                    .into_iter()
                    .map(|service| {
                        let latency = latency_label(&service);
                        view! {
                            <tr>
                                <td>{service.name}</td>
                                <td>
                                    <span class=format!(
                                        "status-pill {}",
                                        status_class(&service.status),
                                    )>{service.status.clone()}</span>
                                </td>
                                <td>{latency}</td>
                                <td>{service.message.unwrap_or_default()}</td>
                            </tr>
                        }
                    })
                    .collect::<Vec<_>>()}
            </tbody>
        </table>
    }
}

#[component]
pub fn AdminHealth() -> impl IntoView {
    let health = RwSignal::new(Remote::<SystemHealth>::Loading);
    let reload = move || load_into(health, |api| async move { api.system_health().await });
    reload();

    view! {
        <section class="admin-health">
            <div class="admin-toolbar">
                <button class="btn" disabled=move || health.with(Remote::is_loading) on:click=move |_| reload()>
                    "Refresh"
                </button>
            </div>
            {move || match health.get() {
                Remote::Loading => view! { <p>"Checking services..."</p> }.into_any(),
                Remote::Failed(msg) => {
                    view! { <Alert message=msg on_retry=Callback::new(move |()| reload())/> }.into_any()
                }
                Remote::Ready(h) => view! { <HealthReport health=h/> }.into_any(),
            }}
        </section>
    }
}
