//! Display formatting for money, dates, and durations.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use chrono::{DateTime, NaiveDate, Utc};

/// `KES 2,400.00`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn format_kes(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    format!("{sign}KES {}.{:02}", group_thousands(cents / 100), cents % 100)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `01 Nov 2026`.
#[must_use]
pub fn format_date(value: &DateTime<Utc>) -> String {
    value.format("%d %b %Y").to_string()
}

#[must_use]
pub fn format_naive_date(value: NaiveDate) -> String {
    value.format("%d %b %Y").to_string()
}

/// Date or a dash placeholder.
#[must_use]
pub fn format_optional_date(value: Option<&DateTime<Utc>>) -> String {
    value.map_or_else(|| "-".to_owned(), format_date)
}

/// `3d 4h 12m`; minutes only under an hour.
#[must_use]
pub fn format_uptime(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let minutes = (seconds % 3_600) / 60;
    match (days, hours) {
        (0, 0) => format!("{minutes}m"),
        (0, _) => format!("{hours}h {minutes}m"),
        _ => format!("{days}d {hours}h {minutes}m"),
    }
}

/// Percentage with one decimal, e.g. `87.5%`.
#[must_use]
pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}
