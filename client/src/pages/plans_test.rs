use std::collections::BTreeMap;

use super::*;
use crate::net::types::Premiums;

fn plan(id: &str, active: bool) -> Plan {
    Plan {
        id: id.to_owned(),
        name: "Afya Bora".to_owned(),
        description: String::new(),
        category: "family".to_owned(),
        premiums: Premiums { daily: 80.0, weekly: 600.0, monthly: 2400.0, annual: 26_000.0 },
        benefits: Vec::new(),
        coverage_limits: BTreeMap::new(),
        is_active: active,
    }
}

#[test]
fn visible_plans_hides_inactive() {
    let list = vec![plan("a", true), plan("b", false), plan("c", true)];
    let ids: Vec<_> = visible_plans(&list).into_iter().map(|p| p.id).collect();
    assert_eq!(ids, vec!["a".to_owned(), "c".to_owned()]);
}

#[test]
fn frequency_label_capitalises() {
    assert_eq!(frequency_label(Frequency::Monthly), "Monthly");
    assert_eq!(frequency_label(Frequency::Annual), "Annual");
}

#[test]
fn premium_description_names_plan_and_cadence() {
    assert_eq!(premium_description(&plan("a", true), Frequency::Weekly), "Afya Bora weekly premium");
}
