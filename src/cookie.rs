//! `document.cookie` string codec for the session cookie.
//!
//! The browser exposes cookies as one `name=value; name=value` header string
//! for reads and accepts one directive per write
//! (`name=value; path=/; max-age=N; samesite=strict`).

#[cfg(test)]
#[path = "cookie_test.rs"]
mod cookie_test;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "authToken";

/// Directive that stores `token` for `max_age_secs`.
#[must_use]
pub fn session_cookie(token: &str, max_age_secs: u64) -> String {
    format!("{SESSION_COOKIE}={token}; path=/; max-age={max_age_secs}; samesite=strict")
}

/// Directive that expires the session cookie immediately.
#[must_use]
pub fn expired_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; path=/; max-age=0; samesite=strict")
}

/// Find a non-empty cookie value by name in a `document.cookie` header.
#[must_use]
pub fn find<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| k.trim() == name)
        .map(|(_, v)| v.trim())
        .filter(|v| !v.is_empty())
}

/// One parsed cookie write directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive<'a> {
    pub name: &'a str,
    pub value: &'a str,
    pub max_age: Option<i64>,
}

impl<'a> Directive<'a> {
    /// Parse `name=value; attr=...; ...`. Returns `None` when the leading
    /// pair is missing.
    #[must_use]
    pub fn parse(raw: &'a str) -> Option<Self> {
        let mut parts = raw.split(';');
        let (name, value) = parts.next()?.trim().split_once('=')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let max_age = parts
            .filter_map(|attr| attr.trim().split_once('='))
            .find(|(k, _)| k.trim().eq_ignore_ascii_case("max-age"))
            .and_then(|(_, v)| v.trim().parse::<i64>().ok());
        Some(Self { name, value: value.trim(), max_age })
    }

    /// A directive with `max-age<=0` or an empty value deletes the cookie.
    #[must_use]
    pub fn is_removal(&self) -> bool {
        self.value.is_empty() || self.max_age.is_some_and(|age| age <= 0)
    }
}
