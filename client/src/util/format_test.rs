use chrono::TimeZone;

use super::*;

#[test]
fn format_kes_groups_thousands() {
    assert_eq!(format_kes(2400.0), "KES 2,400.00");
    assert_eq!(format_kes(0.0), "KES 0.00");
    assert_eq!(format_kes(999.5), "KES 999.50");
    assert_eq!(format_kes(1_234_567.891), "KES 1,234,567.89");
    assert_eq!(format_kes(-50.0), "-KES 50.00");
}

#[test]
fn format_date_uses_day_month_year() {
    let date = Utc.with_ymd_and_hms(2026, 11, 1, 8, 30, 0).unwrap();
    assert_eq!(format_date(&date), "01 Nov 2026");
    assert_eq!(format_optional_date(None), "-");
    assert_eq!(format_optional_date(Some(&date)), "01 Nov 2026");
}

#[test]
fn format_uptime_picks_largest_units() {
    assert_eq!(format_uptime(59), "0m");
    assert_eq!(format_uptime(3_660), "1h 1m");
    assert_eq!(format_uptime(3 * 86_400 + 4 * 3_600 + 12 * 60), "3d 4h 12m");
}

#[test]
fn format_percent_rounds_to_one_decimal() {
    assert_eq!(format_percent(87.54), "87.5%");
    assert_eq!(format_percent(0.0), "0.0%");
}
