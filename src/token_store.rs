//! Session token and username bookkeeping across durable storage and cookie.
//!
//! DESIGN
//! ======
//! The token lives in two places: the durable store (read by client code for
//! API calls) and the `authToken` cookie (read by the server when routing
//! pages). Callers only see this type; neither location is touched directly.
//! No operation fails: storage errors are logged and treated as "absent".

#[cfg(test)]
#[path = "token_store_test.rs"]
mod token_store_test;

use std::rc::Rc;

use crate::api::bearer;
use crate::config::DEFAULT_COOKIE_MAX_AGE_SECS;
use crate::cookie::{self, SESSION_COOKIE};
use crate::storage::{CookieJar, KeyValueStore};

pub const TOKEN_KEY: &str = "authToken";
pub const USERNAME_KEY: &str = "username";

#[derive(Clone)]
pub struct TokenStore {
    storage: Rc<dyn KeyValueStore>,
    cookies: Rc<dyn CookieJar>,
    cookie_max_age_secs: u64,
}

impl TokenStore {
    pub fn new(storage: Rc<dyn KeyValueStore>, cookies: Rc<dyn CookieJar>) -> Self {
        Self { storage, cookies, cookie_max_age_secs: DEFAULT_COOKIE_MAX_AGE_SECS }
    }

    #[must_use]
    pub fn with_cookie_max_age(mut self, secs: u64) -> Self {
        self.cookie_max_age_secs = secs;
        self
    }

    /// The durable store, shared with preference helpers.
    #[must_use]
    pub fn storage(&self) -> Rc<dyn KeyValueStore> {
        Rc::clone(&self.storage)
    }

    /// Current token: durable store first, then the cookie. A token found
    /// only in the cookie is copied back into the durable store.
    #[must_use]
    pub fn read(&self) -> Option<String> {
        if let Some(token) = self.stored_token() {
            return Some(token);
        }

        let header = match self.cookies.header() {
            Ok(header) => header,
            Err(e) => {
                tracing::debug!(error = %e, "cookie read failed");
                return None;
            }
        };
        let token = cookie::find(&header, SESSION_COOKIE)?.to_owned();
        if let Err(e) = self.storage.set(TOKEN_KEY, &token) {
            tracing::debug!(error = %e, "token backfill failed");
        } else {
            tracing::debug!("token restored from cookie");
        }
        Some(token)
    }

    /// `Authorization` header value for the current token.
    #[must_use]
    pub fn authorization(&self) -> Option<String> {
        self.read().map(|token| bearer(&token))
    }

    #[must_use]
    pub fn username(&self) -> Option<String> {
        self.storage
            .get(USERNAME_KEY)
            .ok()
            .flatten()
            .filter(|u| !u.is_empty())
    }

    /// Persist a freshly issued token in both locations.
    pub fn write(&self, token: &str, username: &str) {
        for (key, value) in [(TOKEN_KEY, token), (USERNAME_KEY, username)] {
            if let Err(e) = self.storage.set(key, value) {
                tracing::warn!(key, error = %e, "storage write failed");
            }
        }
        if let Err(e) = self.cookies.write(&cookie::session_cookie(token, self.cookie_max_age_secs)) {
            tracing::warn!(error = %e, "session cookie write failed");
        }
    }

    /// Remove token and username and expire the cookie. Idempotent.
    pub fn clear(&self) {
        for key in [TOKEN_KEY, USERNAME_KEY] {
            if let Err(e) = self.storage.remove(key) {
                tracing::debug!(key, error = %e, "storage remove failed");
            }
        }
        if let Err(e) = self.cookies.write(&cookie::expired_session_cookie()) {
            tracing::debug!(error = %e, "session cookie expiry failed");
        }
    }

    fn stored_token(&self) -> Option<String> {
        match self.storage.get(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::debug!(error = %e, "token read failed");
                None
            }
        }
    }
}
