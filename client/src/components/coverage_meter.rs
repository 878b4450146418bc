//! Coverage utilisation bar for one benefit category.

use leptos::prelude::*;

use crate::net::types::CoverageUsage;
use crate::util::format::{format_kes, format_percent};
use crate::util::schedule::{utilization_band, utilization_percent};

#[component]
pub fn CoverageMeter(usage: CoverageUsage) -> impl IntoView {
    let percent = utilization_percent(usage.used, usage.limit);
    let band = utilization_band(percent);

    view! {
        <div class=format!("coverage-meter coverage-meter--{band}")>
            <div class="coverage-meter__label">
                <span>{usage.category.replace('_', " ")}</span>
                <span>{format_percent(percent)}</span>
            </div>
            <div class="coverage-meter__track">
                <div class="coverage-meter__fill" style=format!("width: {percent:.1}%")></div>
            </div>
            <div class="coverage-meter__amounts">
                {format!("{} of {} used", format_kes(usage.used), format_kes(usage.limit))}
            </div>
        </div>
    }
}
