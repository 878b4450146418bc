use super::*;

fn valid() -> RegistrationForm {
    RegistrationForm {
        first_name: " Jane ".to_owned(),
        last_name: "Wanjiku".to_owned(),
        email: "Jane@Example.co.ke".to_owned(),
        phone_number: "0712 345 678".to_owned(),
        id_number: "12345678".to_owned(),
        password: "secret123".to_owned(),
        confirm_password: "secret123".to_owned(),
    }
}

#[test]
fn to_request_normalises_fields() {
    let request = valid().to_request().expect("valid form");
    assert_eq!(request.first_name, "Jane");
    assert_eq!(request.email, "jane@example.co.ke");
    assert_eq!(request.phone_number, "254712345678");
    assert_eq!(request.id_number, "12345678");
}

#[test]
fn to_request_reports_first_problem() {
    let form = RegistrationForm { first_name: String::new(), email: String::new(), ..valid() };
    assert_eq!(form.to_request(), Err("First name is required"));
}

#[test]
fn to_request_checks_phone_and_id() {
    let form = RegistrationForm { phone_number: "12345".to_owned(), ..valid() };
    assert_eq!(form.to_request(), Err("Enter a valid Safaricom number, e.g. 0712345678"));

    let form = RegistrationForm { id_number: "12AB".to_owned(), ..valid() };
    assert_eq!(form.to_request(), Err("ID number must be 6-10 digits"));
}

#[test]
fn to_request_checks_passwords() {
    let form = RegistrationForm { password: "short".to_owned(), confirm_password: "short".to_owned(), ..valid() };
    assert_eq!(form.to_request(), Err("Password must be at least 8 characters"));

    let form = RegistrationForm { confirm_password: "secret124".to_owned(), ..valid() };
    assert_eq!(form.to_request(), Err("Passwords do not match"));
}
