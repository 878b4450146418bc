use super::*;

#[test]
fn default_is_loading() {
    let state: Remote<Vec<u8>> = Remote::default();
    assert!(state.is_loading());
    assert_eq!(state.ready(), None);
}

#[test]
fn from_result_maps_errors_to_messages() {
    let ok: Remote<u32> = Remote::from_result(Ok(3));
    assert_eq!(ok.ready(), Some(&3));

    let failed: Remote<u32> = Remote::from_result(Err(ApiError::Api { status: 404, message: "Plan not found".to_owned() }));
    assert_eq!(failed.error(), Some("Plan not found"));
    assert!(!failed.is_loading());
}

#[test]
fn update_ready_only_touches_loaded_data() {
    let mut loaded = Remote::Ready(vec![1, 2]);
    loaded.update_ready(|v| v.push(3));
    assert_eq!(loaded, Remote::Ready(vec![1, 2, 3]));

    let mut loading: Remote<Vec<i32>> = Remote::Loading;
    loading.update_ready(|v| v.push(3));
    assert_eq!(loading, Remote::Loading);
}

#[test]
fn only_the_latest_ticket_is_current() {
    let mut seq = RequestSeq::default();
    let thirty_days = seq.issue();
    let seven_days = seq.issue();

    assert!(!seq.is_current(thirty_days));
    assert!(seq.is_current(seven_days));
}

#[test]
fn nothing_is_current_before_the_first_request() {
    assert!(!RequestSeq::default().is_current(1));
}
