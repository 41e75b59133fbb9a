//! `localStorage` and `document.cookie` adapters.
//!
//! SYSTEM CONTEXT
//! ==============
//! These centralize csr-only web-sys glue so the token store and preference
//! helpers never touch the DOM directly. Outside the browser every call
//! reports the storage as unavailable.

use session::{CookieJar, KeyValueStore, StorageError};

#[cfg(feature = "csr")]
fn js_error(e: &wasm_bindgen::JsValue) -> StorageError {
    StorageError(format!("{e:?}"))
}

#[cfg(not(feature = "csr"))]
fn unavailable() -> StorageError {
    StorageError("no browser environment".to_owned())
}

#[cfg(feature = "csr")]
fn local_storage() -> Result<web_sys::Storage, StorageError> {
    let window = web_sys::window().ok_or_else(|| StorageError("no window".to_owned()))?;
    window
        .local_storage()
        .map_err(|e| js_error(&e))?
        .ok_or_else(|| StorageError("localStorage disabled".to_owned()))
}

/// [`KeyValueStore`] over `window.localStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStore;

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        #[cfg(feature = "csr")]
        {
            local_storage()?.get_item(key).map_err(|e| js_error(&e))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            Err(unavailable())
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        #[cfg(feature = "csr")]
        {
            local_storage()?.set_item(key, value).map_err(|e| js_error(&e))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (key, value);
            Err(unavailable())
        }
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        #[cfg(feature = "csr")]
        {
            local_storage()?.remove_item(key).map_err(|e| js_error(&e))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            Err(unavailable())
        }
    }
}

#[cfg(feature = "csr")]
fn html_document() -> Result<web_sys::HtmlDocument, StorageError> {
    use wasm_bindgen::JsCast;

    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.dyn_into::<web_sys::HtmlDocument>().ok())
        .ok_or_else(|| StorageError("no html document".to_owned()))
}

/// [`CookieJar`] over `document.cookie`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DocumentCookies;

impl CookieJar for DocumentCookies {
    fn header(&self) -> Result<String, StorageError> {
        #[cfg(feature = "csr")]
        {
            html_document()?.cookie().map_err(|e| js_error(&e))
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(unavailable())
        }
    }

    fn write(&self, directive: &str) -> Result<(), StorageError> {
        #[cfg(feature = "csr")]
        {
            html_document()?.set_cookie(directive).map_err(|e| js_error(&e))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = directive;
            Err(unavailable())
        }
    }
}
