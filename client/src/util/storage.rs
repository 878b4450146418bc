//! Browser storage helpers and the bearer-token store.
//!
//! SYSTEM CONTEXT
//! ==============
//! `token` and `refreshToken` live in `localStorage` when the user asked to be
//! remembered and in `sessionStorage` otherwise. `TokenStore` is the only
//! writer of those keys; the HTTP wrapper and the login/logout flows go
//! through it.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

pub const TOKEN_KEY: &str = "token";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

/// Minimal string key/value store (the subset of `web_sys::Storage` we use).
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Which browser storage area backs a `BrowserStorage`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageArea {
    Local,
    Session,
}

/// `localStorage` / `sessionStorage`. Inert outside the browser.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BrowserStorage {
    area: StorageArea,
}

impl BrowserStorage {
    #[must_use]
    pub fn new(area: StorageArea) -> Self {
        Self { area }
    }

    #[cfg(feature = "hydrate")]
    fn storage(self) -> Option<web_sys::Storage> {
        let window = web_sys::window()?;
        match self.area {
            StorageArea::Local => window.local_storage().ok().flatten(),
            StorageArea::Session => window.session_storage().ok().flatten(),
        }
    }
}

impl KeyValueStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            self.storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            None
        }
    }

    fn set(&self, key: &str, value: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = self.storage() {
                let _ = storage.set_item(key, value);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
        }
    }

    fn remove(&self, key: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = self.storage() {
                let _ = storage.remove_item(key);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
        }
    }
}

/// In-memory storage. Clones share the same map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.items.borrow_mut().insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

/// Dual-storage bearer token store with "remember me" semantics.
#[derive(Clone, Debug)]
pub struct TokenStore<S> {
    local: S,
    session: S,
}

impl TokenStore<BrowserStorage> {
    /// Token store over the real browser storage areas.
    #[must_use]
    pub fn browser() -> Self {
        Self::new(BrowserStorage::new(StorageArea::Local), BrowserStorage::new(StorageArea::Session))
    }
}

impl<S: KeyValueStorage> TokenStore<S> {
    pub fn new(local: S, session: S) -> Self {
        Self { local, session }
    }

    /// Current access token; `localStorage` wins over `sessionStorage`.
    pub fn access_token(&self) -> Option<String> {
        read_non_empty(&self.local, TOKEN_KEY).or_else(|| read_non_empty(&self.session, TOKEN_KEY))
    }

    pub fn refresh_token(&self) -> Option<String> {
        read_non_empty(&self.local, REFRESH_TOKEN_KEY).or_else(|| read_non_empty(&self.session, REFRESH_TOKEN_KEY))
    }

    /// True when the active session lives in `localStorage`.
    pub fn remembered(&self) -> bool {
        read_non_empty(&self.local, TOKEN_KEY).is_some()
    }

    /// Store a fresh session. Writing one area clears the other.
    pub fn save(&self, token: &str, refresh_token: Option<&str>, remember: bool) {
        let (target, other) = if remember { (&self.local, &self.session) } else { (&self.session, &self.local) };
        clear_area(other);
        target.set(TOKEN_KEY, token);
        match refresh_token {
            Some(refresh) => target.set(REFRESH_TOKEN_KEY, refresh),
            None => target.remove(REFRESH_TOKEN_KEY),
        }
    }

    /// Replace tokens after a refresh, keeping the area the session lives in.
    /// A missing new refresh token keeps the previous one.
    pub fn update(&self, token: &str, refresh_token: Option<&str>) {
        let refresh = refresh_token.map(str::to_owned).or_else(|| self.refresh_token());
        self.save(token, refresh.as_deref(), self.remembered());
    }

    pub fn clear(&self) {
        clear_area(&self.local);
        clear_area(&self.session);
    }
}

fn read_non_empty<S: KeyValueStorage>(storage: &S, key: &str) -> Option<String> {
    storage.get(key).filter(|v| !v.trim().is_empty())
}

fn clear_area<S: KeyValueStorage>(storage: &S) {
    storage.remove(TOKEN_KEY);
    storage.remove(REFRESH_TOKEN_KEY);
}
