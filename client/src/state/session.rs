//! Per-page-load session wiring.
//!
//! SYSTEM CONTEXT
//! ==============
//! Builds the `SessionGuard` from browser adapters once per page load and
//! shares it through context. The guard and REST client hold `Rc`s, so the
//! bundle sits in local (non-`Send`) reactive storage.

use std::rc::Rc;

use leptos::prelude::*;
use session::{GuardConfig, KeyValueStore, Preferences, SessionGuard, TokenStore};

use crate::net::api::HttpApi;
use crate::state::toast::{ToastNotifier, ToastState};
use crate::util::navigation::WindowNavigator;
use crate::util::storage::{DocumentCookies, LocalStore};
use crate::util::timer::BrowserTimer;

#[derive(Clone)]
pub struct Session {
    pub guard: SessionGuard,
    pub api: Rc<HttpApi>,
    pub prefs: Preferences,
}

pub type SessionHandle = StoredValue<Session, LocalStorage>;

impl Session {
    pub fn new(toasts: RwSignal<ToastState>) -> Self {
        let config = GuardConfig::from_build_env().unwrap_or_else(|e| {
            leptos::logging::warn!("invalid session config, using defaults: {e}");
            GuardConfig::default()
        });
        let storage: Rc<dyn KeyValueStore> = Rc::new(LocalStore);
        let tokens = TokenStore::new(Rc::clone(&storage), Rc::new(DocumentCookies));
        let api = Rc::new(HttpApi::new(tokens.clone()));
        let guard = SessionGuard::new(
            config,
            tokens,
            api.clone(),
            Rc::new(WindowNavigator),
            Rc::new(ToastNotifier::new(toasts)),
            Rc::new(BrowserTimer),
        );
        Self { guard, api, prefs: Preferences::new(storage) }
    }
}

pub fn provide_session(toasts: RwSignal<ToastState>) {
    provide_context::<SessionHandle>(StoredValue::new_local(Session::new(toasts)));
}

pub fn use_session() -> SessionHandle {
    expect_context::<SessionHandle>()
}
