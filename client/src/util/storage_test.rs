use super::*;

fn store() -> (TokenStore<MemoryStorage>, MemoryStorage, MemoryStorage) {
    let local = MemoryStorage::new();
    let session = MemoryStorage::new();
    (TokenStore::new(local.clone(), session.clone()), local, session)
}

#[test]
fn remembered_session_goes_to_local_storage() {
    let (tokens, local, session) = store();
    tokens.save("t1", Some("r1"), true);

    assert_eq!(local.get(TOKEN_KEY).as_deref(), Some("t1"));
    assert_eq!(local.get(REFRESH_TOKEN_KEY).as_deref(), Some("r1"));
    assert!(session.is_empty());
    assert!(tokens.remembered());
}

#[test]
fn unremembered_session_goes_to_session_storage_and_clears_local() {
    let (tokens, local, session) = store();
    tokens.save("old", Some("old-r"), true);
    tokens.save("t2", None, false);

    assert!(local.is_empty());
    assert_eq!(session.get(TOKEN_KEY).as_deref(), Some("t2"));
    assert_eq!(tokens.refresh_token(), None);
    assert!(!tokens.remembered());
}

#[test]
fn access_token_prefers_local_then_session() {
    let (tokens, local, session) = store();
    session.set(TOKEN_KEY, "from-session");
    assert_eq!(tokens.access_token().as_deref(), Some("from-session"));

    local.set(TOKEN_KEY, "from-local");
    assert_eq!(tokens.access_token().as_deref(), Some("from-local"));
}

#[test]
fn blank_tokens_are_treated_as_missing() {
    let (tokens, local, _) = store();
    local.set(TOKEN_KEY, "  ");
    assert_eq!(tokens.access_token(), None);
}

#[test]
fn update_keeps_storage_area_and_previous_refresh_token() {
    let (tokens, _, session) = store();
    tokens.save("t1", Some("r1"), false);
    tokens.update("t2", None);

    assert_eq!(session.get(TOKEN_KEY).as_deref(), Some("t2"));
    assert_eq!(session.get(REFRESH_TOKEN_KEY).as_deref(), Some("r1"));

    tokens.update("t3", Some("r3"));
    assert_eq!(tokens.access_token().as_deref(), Some("t3"));
    assert_eq!(tokens.refresh_token().as_deref(), Some("r3"));
}

#[test]
fn clear_wipes_both_areas() {
    let (tokens, local, session) = store();
    local.set(TOKEN_KEY, "a");
    session.set(REFRESH_TOKEN_KEY, "b");
    tokens.clear();
    assert!(local.is_empty());
    assert!(session.is_empty());
}
