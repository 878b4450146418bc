use super::*;

#[test]
fn from_response_prefers_message_then_error_field() {
    let err = ApiError::from_response(400, r#"{"message":"Phone number is invalid","error":"bad"}"#);
    assert_eq!(err, ApiError::Api { status: 400, message: "Phone number is invalid".to_owned() });

    let err = ApiError::from_response(409, r#"{"error":"Already subscribed"}"#);
    assert_eq!(err.to_string(), "Already subscribed");
}

#[test]
fn from_response_skips_blank_message() {
    let err = ApiError::from_response(403, r#"{"message":"  ","error":"Admins only"}"#);
    assert_eq!(err.to_string(), "Admins only");
}

#[test]
fn from_response_falls_back_per_status_class() {
    assert_eq!(
        ApiError::from_response(401, "").to_string(),
        "Your session has expired. Please log in again."
    );
    assert_eq!(
        ApiError::from_response(403, "<html>").to_string(),
        "You do not have permission to perform this action."
    );
    assert_eq!(ApiError::from_response(404, "{}").to_string(), "The requested resource was not found.");
    assert_eq!(ApiError::from_response(502, "").to_string(), "Server error. Please try again later.");
    assert_eq!(ApiError::from_response(418, "").to_string(), "Request failed with status 418");
}

#[test]
fn status_only_present_for_api_errors() {
    assert_eq!(ApiError::from_response(401, "").status(), Some(401));
    assert!(ApiError::from_response(401, "").is_unauthorized());
    assert_eq!(ApiError::Network("offline".to_owned()).status(), None);
    assert!(!ApiError::SessionExpired.is_unauthorized());
}
