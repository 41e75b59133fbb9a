//! Durable key/value storage and cookie access seams.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser build backs these with `localStorage` and `document.cookie`.
//! The in-memory versions here back native tests and any non-browser host.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::cookie::Directive;
use crate::error::StorageError;

/// Durable client-side string storage (`localStorage` in the browser).
pub trait KeyValueStore {
    /// Read `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backing store is unavailable.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backing store is unavailable or full.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`; deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backing store is unavailable.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Cookie access shaped like `document.cookie`.
pub trait CookieJar {
    /// The full `name=value; name=value` header visible to scripts.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if cookies are unavailable.
    fn header(&self) -> Result<String, StorageError>;

    /// Apply one write directive (`name=value; path=/; max-age=N; ...`).
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if cookies are unavailable.
    fn write(&self, directive: &str) -> Result<(), StorageError>;
}

/// In-memory [`KeyValueStore`]. Clones share the same entries.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
    failing: Rc<Cell<bool>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail, the way a disabled `localStorage` does.
    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.failing.get() {
            return Err(StorageError("storage disabled".to_owned()));
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check()?;
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check()?;
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.check()?;
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// In-memory [`CookieJar`] that honours `max-age` removal. Clones share state.
#[derive(Clone, Debug, Default)]
pub struct MemoryCookieJar {
    cookies: Rc<RefCell<BTreeMap<String, String>>>,
    written: Rc<RefCell<Vec<String>>>,
}

impl MemoryCookieJar {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every directive written so far, oldest first.
    #[must_use]
    pub fn written(&self) -> Vec<String> {
        self.written.borrow().clone()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<String> {
        self.cookies.borrow().get(name).cloned()
    }
}

impl CookieJar for MemoryCookieJar {
    fn header(&self) -> Result<String, StorageError> {
        let header = self
            .cookies
            .borrow()
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("; ");
        Ok(header)
    }

    fn write(&self, directive: &str) -> Result<(), StorageError> {
        self.written.borrow_mut().push(directive.to_owned());
        let Some(parsed) = Directive::parse(directive) else {
            return Ok(());
        };
        let mut cookies = self.cookies.borrow_mut();
        if parsed.is_removal() {
            cookies.remove(parsed.name);
        } else {
            cookies.insert(parsed.name.to_owned(), parsed.value.to_owned());
        }
        Ok(())
    }
}
