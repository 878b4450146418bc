use chrono::{TimeZone, Utc};

use super::*;
use crate::net::types::{Frequency, Plan, PlanRef, Premiums};

fn subscription(frequency: Frequency, embedded: bool) -> Subscription {
    let plan = Plan {
        id: "p1".to_owned(),
        name: "Afya Bora".to_owned(),
        description: String::new(),
        category: "medical".to_owned(),
        premiums: Premiums { daily: 80.0, weekly: 560.0, monthly: 2400.0, annual: 27_000.0 },
        benefits: Vec::new(),
        coverage_limits: Default::default(),
        is_active: true,
    };
    Subscription {
        id: "s1".to_owned(),
        plan: if embedded { PlanRef::Embedded(Box::new(plan)) } else { PlanRef::Id("p1".to_owned()) },
        frequency,
        status: "active".to_owned(),
        next_payment_date: Utc.with_ymd_and_hms(2026, 1, 31, 9, 0, 0).single(),
        start_date: None,
    }
}

#[test]
fn monthly_rows_step_by_calendar_month() {
    let rows = schedule_rows(&subscription(Frequency::Monthly, true), 3);
    assert_eq!(
        rows,
        vec![
            ("31 Jan 2026".to_owned(), "KES 2,400.00".to_owned()),
            ("28 Feb 2026".to_owned(), "KES 2,400.00".to_owned()),
            ("31 Mar 2026".to_owned(), "KES 2,400.00".to_owned()),
        ]
    );
}

#[test]
fn unknown_premium_shows_dash() {
    let rows = schedule_rows(&subscription(Frequency::Weekly, false), 2);
    assert_eq!(rows[1], ("07 Feb 2026".to_owned(), "-".to_owned()));
}

#[test]
fn missing_next_date_yields_no_rows() {
    let mut sub = subscription(Frequency::Daily, true);
    sub.next_payment_date = None;
    assert!(schedule_rows(&sub, 4).is_empty());
}
