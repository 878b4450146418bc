use std::rc::Rc;

use futures::executor::block_on;

use super::*;
use crate::net::test_support::{FakeTransport, reply, user};
use crate::util::storage::{MemoryStorage, TokenStore};

fn api(replies: Vec<Result<crate::net::http::HttpResponse, crate::net::error::ApiError>>) -> ApiClient<FakeTransport, MemoryStorage> {
    ApiClient::new(
        FakeTransport::with(replies),
        TokenStore::new(MemoryStorage::new(), MemoryStorage::new()),
        Rc::new(|| {}),
    )
}

#[test]
fn initializing_is_loading_without_user() {
    let state = AuthState::initializing();
    assert!(state.loading);
    assert!(!state.is_authenticated());
}

#[test]
fn signed_in_and_out_clear_loading() {
    let mut state = AuthState::initializing();
    state.signed_in(user("u1", Role::Member));
    assert!(!state.loading);
    assert!(state.is_authenticated());
    assert!(!state.is_admin());
    assert_eq!(state.display_name(), "Jane Wanjiku");

    state.signed_out();
    assert!(!state.loading);
    assert!(!state.is_authenticated());
    assert_eq!(state.display_name(), "");
}

#[test]
fn admin_role_is_detected() {
    let mut state = AuthState::default();
    state.signed_in(user("a1", Role::Admin));
    assert!(state.is_admin());
}

#[test]
fn restore_session_without_token_skips_request() {
    let client = api(vec![]);
    assert_eq!(block_on(restore_session(&client)), None);
    assert!(client.transport_ref().sent.borrow().is_empty());
}

#[test]
fn restore_session_returns_profile_for_stored_token() {
    let client = api(vec![reply(200, r#"{"id":"u1","email":"u1@example.co.ke","role":"member"}"#)]);
    client.tokens().save("t1", Some("r1"), true);

    let restored = block_on(restore_session(&client)).expect("session restored");
    assert_eq!(restored.id, "u1");
    assert_eq!(restored.role, Role::Member);
}

#[test]
fn restore_session_treats_rejection_as_signed_out() {
    let client = api(vec![reply(500, r#"{"message":"boom"}"#)]);
    client.tokens().save("t1", None, false);
    assert_eq!(block_on(restore_session(&client)), None);
}
