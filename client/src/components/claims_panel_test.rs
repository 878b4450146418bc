use super::*;

#[test]
fn builds_request_from_trimmed_fields() {
    assert_eq!(
        build_claim_request(" outpatient ", "1,250.50", " Clinic visit "),
        Ok(ClaimRequest {
            category: "outpatient".to_owned(),
            amount: 1250.5,
            description: "Clinic visit".to_owned(),
        })
    );
}

#[test]
fn reports_first_invalid_field() {
    assert_eq!(build_claim_request("", "100", "x"), Err("Choose a benefit category"));
    assert_eq!(build_claim_request("outpatient", "abc", "x"), Err("Enter a numeric amount"));
    assert_eq!(build_claim_request("outpatient", "-5", "x"), Err("Amount must be greater than zero"));
    assert_eq!(build_claim_request("outpatient", "100", "  "), Err("Describe what the claim is for"));
}
