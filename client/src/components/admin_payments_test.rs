use super::*;

fn payment(id: &str, status: PaymentStatus, phone: &str, receipt: Option<&str>, description: &str) -> Payment {
    Payment {
        id: id.to_owned(),
        amount: 2400.0,
        phone_number: phone.to_owned(),
        status,
        mpesa_receipt_number: receipt.map(str::to_owned),
        checkout_request_id: None,
        description: description.to_owned(),
        created_at: None,
    }
}

fn sample() -> Vec<Payment> {
    vec![
        payment("p1", PaymentStatus::Completed, "254712345678", Some("QWE123"), "Afya Bora monthly"),
        payment("p2", PaymentStatus::Failed, "254700000001", None, "Afya Bora weekly"),
        payment("p3", PaymentStatus::Completed, "254700000002", Some("RTY456"), "Jamii annual"),
    ]
}

fn ids(rows: &[Payment]) -> Vec<&str> {
    rows.iter().map(|p| p.id.as_str()).collect()
}

#[test]
fn parse_days_accepts_offered_windows_only() {
    assert_eq!(parse_days("7"), 7);
    assert_eq!(parse_days("90"), 90);
    assert_eq!(parse_days("14"), DEFAULT_ANALYTICS_DAYS);
    assert_eq!(parse_days("abc"), DEFAULT_ANALYTICS_DAYS);
}

#[test]
fn parse_status_filter_maps_known_values() {
    assert_eq!(parse_status_filter("failed"), Some(PaymentStatus::Failed));
    assert_eq!(parse_status_filter(""), None);
    assert_eq!(parse_status_filter("bogus"), None);
}

#[test]
fn filter_by_status() {
    let rows = filter_payments(&sample(), Some(PaymentStatus::Completed), "");
    assert_eq!(ids(&rows), vec!["p1", "p3"]);
}

#[test]
fn filter_by_search_matches_phone_receipt_and_description() {
    let all = sample();
    assert_eq!(ids(&filter_payments(&all, None, "0000001")), vec!["p2"]);
    assert_eq!(ids(&filter_payments(&all, None, "rty")), vec!["p3"]);
    assert_eq!(ids(&filter_payments(&all, None, " AFYA ")), vec!["p1", "p2"]);
    assert_eq!(ids(&filter_payments(&all, Some(PaymentStatus::Failed), "jamii")), Vec::<&str>::new());
}

#[test]
fn export_file_name_reflects_filter() {
    assert_eq!(export_file_name(None), "payments.csv");
    assert_eq!(export_file_name(Some(PaymentStatus::Completed)), "payments-completed.csv");
}
