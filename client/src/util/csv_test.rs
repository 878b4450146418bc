use super::*;
use crate::net::types::PaymentStatus;

#[test]
fn escape_field_quotes_only_when_needed() {
    assert_eq!(escape_field("plain"), "plain");
    assert_eq!(escape_field("a,b"), "\"a,b\"");
    assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    assert_eq!(escape_field("line\nbreak"), "\"line\nbreak\"");
}

#[test]
fn to_csv_joins_header_and_rows() {
    let rows = vec![vec!["1".to_owned(), "x,y".to_owned()]];
    assert_eq!(to_csv(&["id", "value"], &rows), "id,value\r\n1,\"x,y\"");
}

#[test]
fn payments_csv_renders_each_payment() {
    let payments = vec![Payment {
        id: "p1".to_owned(),
        amount: 2400.0,
        phone_number: "254712345678".to_owned(),
        status: PaymentStatus::Completed,
        mpesa_receipt_number: Some("QWE123".to_owned()),
        checkout_request_id: None,
        description: "Premium, October".to_owned(),
        created_at: None,
    }];
    let csv = payments_csv(&payments);
    let mut lines = csv.split("\r\n");
    assert_eq!(
        lines.next(),
        Some("Payment ID,Date,Phone,Amount (KES),Status,M-Pesa Receipt,Description")
    );
    assert_eq!(lines.next(), Some("p1,-,254712345678,2400.00,completed,QWE123,\"Premium, October\""));
    assert_eq!(lines.next(), None);
}
