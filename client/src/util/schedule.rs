//! Payment schedule and coverage arithmetic for the member dashboard.

#[cfg(test)]
#[path = "schedule_test.rs"]
mod schedule_test;

use chrono::{Days, Months, NaiveDate};

use crate::net::types::Frequency;

/// `count` due dates starting at `first_due` (inclusive).
///
/// Monthly and annual steps are computed from `first_due` rather than
/// chained, so a 31st-of-month schedule does not drift to the 28th.
#[must_use]
pub fn upcoming_due_dates(first_due: NaiveDate, frequency: Frequency, count: usize) -> Vec<NaiveDate> {
    (0..count)
        .map_while(|i| {
            let step = u32::try_from(i).ok()?;
            match frequency {
                Frequency::Daily => first_due.checked_add_days(Days::new(u64::from(step))),
                Frequency::Weekly => first_due.checked_add_days(Days::new(u64::from(step) * 7)),
                Frequency::Monthly => first_due.checked_add_months(Months::new(step)),
                Frequency::Annual => first_due.checked_add_months(Months::new(step * 12)),
            }
        })
        .collect()
}

/// Used share of a coverage limit in percent, clamped to `0..=100`.
#[must_use]
pub fn utilization_percent(used: f64, limit: f64) -> f64 {
    if limit <= 0.0 || !used.is_finite() {
        return 0.0;
    }
    (used / limit * 100.0).clamp(0.0, 100.0)
}

/// Meter colour band for a utilisation percentage.
#[must_use]
pub fn utilization_band(percent: f64) -> &'static str {
    if percent >= 90.0 {
        "critical"
    } else if percent >= 70.0 {
        "warning"
    } else {
        "ok"
    }
}
