use std::collections::BTreeMap;

use super::*;
use crate::net::types::Premiums;

fn plan() -> Plan {
    Plan {
        id: "p1".to_owned(),
        name: "Afya Bora".to_owned(),
        description: "Family medical cover".to_owned(),
        category: "medical".to_owned(),
        premiums: Premiums { daily: 80.0, weekly: 560.0, monthly: 2400.0, annual: 27_000.0 },
        benefits: vec!["Inpatient".to_owned()],
        coverage_limits: BTreeMap::from([
            ("inpatient".to_owned(), 500_000.0),
            ("out_patient".to_owned(), 50_000.0),
        ]),
        is_active: true,
    }
}

#[test]
fn premium_label_follows_frequency() {
    assert_eq!(premium_label(&plan(), Frequency::Monthly), "KES 2,400.00 / month");
    assert_eq!(premium_label(&plan(), Frequency::Annual), "KES 27,000.00 / year");
    assert_eq!(premium_label(&plan(), Frequency::Daily), "KES 80.00 / day");
}

#[test]
fn coverage_rows_are_sorted_and_humanized() {
    assert_eq!(
        coverage_rows(&plan()),
        vec![
            ("inpatient".to_owned(), "KES 500,000.00".to_owned()),
            ("out patient".to_owned(), "KES 50,000.00".to_owned()),
        ]
    );
}
