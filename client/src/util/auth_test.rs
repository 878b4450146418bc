use super::*;
use crate::net::test_support::user;
use crate::net::types::Role;

#[test]
fn should_redirect_unauth_when_not_loading_and_user_missing() {
    let state = AuthState { user: None, loading: false };
    assert!(should_redirect_unauth(&state));
}

#[test]
fn should_not_redirect_while_loading() {
    let state = AuthState { user: None, loading: true };
    assert!(!should_redirect_unauth(&state));
    assert!(!should_redirect_non_admin(&state));
}

#[test]
fn should_not_redirect_when_user_exists() {
    let state = AuthState { user: Some(user("u1", Role::Member)), loading: false };
    assert!(!should_redirect_unauth(&state));
}

#[test]
fn members_are_bounced_from_admin_routes() {
    let member = AuthState { user: Some(user("u1", Role::Member)), loading: false };
    let admin = AuthState { user: Some(user("a1", Role::Admin)), loading: false };
    assert!(should_redirect_non_admin(&member));
    assert!(!should_redirect_non_admin(&admin));
    assert!(!should_redirect_non_admin(&AuthState::default()));
}

#[test]
fn home_route_depends_on_role() {
    let member = AuthState { user: Some(user("u1", Role::Member)), loading: false };
    let admin = AuthState { user: Some(user("a1", Role::Admin)), loading: false };
    assert_eq!(home_route_for(&member), "/dashboard");
    assert_eq!(home_route_for(&admin), "/admin");
}
