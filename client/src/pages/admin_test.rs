use super::*;

#[test]
fn users_tab_opens_first() {
    assert_eq!(AdminTab::default(), AdminTab::Users);
    assert_eq!(AdminTab::ALL[0], AdminTab::Users);
}

#[test]
fn every_tab_has_a_distinct_label() {
    let mut labels: Vec<_> = AdminTab::ALL.iter().map(|t| t.label()).collect();
    labels.sort_unstable();
    labels.dedup();
    assert_eq!(labels.len(), AdminTab::ALL.len());
}
