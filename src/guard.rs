//! Redirect controller for the login and dashboard pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! One [`SessionGuard`] is built per page load. It decides whether the page
//! may proceed, and performs at most one history-replacing navigation per
//! page lifetime so login and dashboard can never bounce into each other.
//!
//! States: `Uninitialized -> Validating -> Authenticated | Redirecting`.
//! `Redirecting` is terminal for the page: every later guard entry point is a
//! no-op until the browser unloads it. Only an explicit logout resets the
//! flags, and logout itself ends in `Redirecting`.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use std::cell::Cell;
use std::rc::Rc;

use async_trait::async_trait;

use crate::api::AuthApi;
use crate::config::GuardConfig;
use crate::error::{ApiError, AuthError, SessionError};
use crate::timeout::{Timer, with_timeout};
use crate::token_store::TokenStore;
use crate::types::{AuthResponse, LoginRequest, RegisterRequest};
use crate::validator::{Validation, Validator};

pub const MSG_LOGIN_SUCCESS: &str = "Login successful! Redirecting...";
pub const MSG_REGISTER_SUCCESS: &str = "Account created successfully! Redirecting...";
pub const MSG_LOGIN_FAILED: &str = "Login failed";
pub const MSG_REGISTER_FAILED: &str = "Registration failed";
pub const MSG_NETWORK_ERROR: &str = "Network error. Please try again.";
pub const MSG_AUTH_TIMEOUT: &str = "Authentication timed out. Please log in again.";
pub const MSG_INIT_FAILED: &str = "Failed to initialize the dashboard. Some features may be unavailable.";
pub const MSG_LOGOUT_CONFIRM: &str = "Are you sure you want to logout?";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GuardState {
    #[default]
    Uninitialized,
    Validating,
    Authenticated,
    Redirecting,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// Page location and history-replacing navigation.
pub trait Navigator {
    fn current_path(&self) -> String;
    /// Navigate, overwriting the current history entry.
    fn replace(&self, path: &str);
}

/// Toasts and the blocking confirmation prompt.
pub trait Notifier {
    fn notify(&self, level: NoticeLevel, message: &str);
    fn confirm(&self, message: &str) -> bool;
}

/// What the dashboard does once the session is confirmed.
///
/// Loads run one after another in declaration order; a failing load is
/// reported and the next one still runs.
#[async_trait(?Send)]
pub trait DashboardLoader {
    /// One-time page setup before any data is requested.
    ///
    /// # Errors
    ///
    /// Any error here leaves the page as-is with a generic notice.
    fn prepare(&self) -> Result<(), SessionError> {
        Ok(())
    }

    async fn load_categories(&self) -> Result<(), ApiError>;
    async fn load_budget(&self) -> Result<(), ApiError>;
    /// Local only; restores the card/table choice.
    fn apply_view_preference(&self);
    async fn load_expenses(&self) -> Result<(), ApiError>;
}

#[derive(Clone, Copy)]
enum SignIn {
    Login,
    Register,
}

impl SignIn {
    fn success_message(self) -> &'static str {
        match self {
            Self::Login => MSG_LOGIN_SUCCESS,
            Self::Register => MSG_REGISTER_SUCCESS,
        }
    }

    fn failure_message(self) -> &'static str {
        match self {
            Self::Login => MSG_LOGIN_FAILED,
            Self::Register => MSG_REGISTER_FAILED,
        }
    }
}

/// Per-page session state machine. Clones share state.
#[derive(Clone)]
pub struct SessionGuard {
    inner: Rc<Inner>,
}

struct Inner {
    config: GuardConfig,
    store: TokenStore,
    validator: Validator,
    auth: Rc<dyn AuthApi>,
    navigator: Rc<dyn Navigator>,
    notifier: Rc<dyn Notifier>,
    timer: Rc<dyn Timer>,
    state: Cell<GuardState>,
    initialized: Cell<bool>,
}

impl SessionGuard {
    pub fn new(
        config: GuardConfig,
        store: TokenStore,
        auth: Rc<dyn AuthApi>,
        navigator: Rc<dyn Navigator>,
        notifier: Rc<dyn Notifier>,
        timer: Rc<dyn Timer>,
    ) -> Self {
        let store = store.with_cookie_max_age(config.cookie_max_age_secs);
        let validator = Validator::new(Rc::clone(&auth), store.clone(), Rc::clone(&timer), config.validation_timeout);
        Self {
            inner: Rc::new(Inner {
                config,
                store,
                validator,
                auth,
                navigator,
                notifier,
                timer,
                state: Cell::new(GuardState::Uninitialized),
                initialized: Cell::new(false),
            }),
        }
    }

    #[must_use]
    pub fn state(&self) -> GuardState {
        self.inner.state.get()
    }

    #[must_use]
    pub fn is_redirecting(&self) -> bool {
        self.state() == GuardState::Redirecting
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.inner.initialized.get()
    }

    #[must_use]
    pub fn config(&self) -> &GuardConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn store(&self) -> &TokenStore {
        &self.inner.store
    }

    #[must_use]
    pub fn validator(&self) -> &Validator {
        &self.inner.validator
    }

    // =========================================================================
    // LOGIN PAGE
    // =========================================================================

    /// Login-page load: forward an already valid session to the dashboard.
    ///
    /// Skipped while a validation or redirect is already in progress.
    pub async fn check_existing_session(&self) -> GuardState {
        if self.inner.validator.is_validating() || self.is_redirecting() {
            tracing::debug!("session check skipped, already in progress");
            return self.state();
        }
        let Some(token) = self.inner.store.read() else {
            return self.state();
        };

        self.set_state(GuardState::Validating);
        let result = self.inner.validator.check(&token).await;
        if self.is_redirecting() {
            return self.state();
        }
        match result {
            Ok(()) if self.on_path(&self.inner.config.dashboard_path) => {
                self.set_state(GuardState::Authenticated);
            }
            Ok(()) => {
                let dashboard = self.inner.config.dashboard_path.clone();
                self.redirect(&dashboard);
            }
            Err(e) => {
                tracing::info!(outcome = ?Validation::of(&Err(e)), "stored session not usable");
                self.inner.store.clear();
                self.set_state(GuardState::Uninitialized);
            }
        }
        self.state()
    }

    /// Submit the login form.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] after the user has been notified of it.
    pub async fn login(&self, request: &LoginRequest) -> Result<(), ApiError> {
        let response = self.inner.auth.login(request).await;
        self.complete_sign_in(SignIn::Login, response).await
    }

    /// Submit the registration form.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] after the user has been notified of it.
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        let response = self.inner.auth.register(request).await;
        self.complete_sign_in(SignIn::Register, response).await
    }

    async fn complete_sign_in(&self, kind: SignIn, response: Result<AuthResponse, ApiError>) -> Result<(), ApiError> {
        let granted = match response {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(error = %e, "sign-in request failed");
                let message = match &e {
                    ApiError::Network(_) => MSG_NETWORK_ERROR,
                    other => other.server_message().unwrap_or(kind.failure_message()),
                };
                self.inner.notifier.notify(NoticeLevel::Error, message);
                return Err(e);
            }
        };

        let Some(token) = granted.granted_token() else {
            let message = granted.message.as_deref().unwrap_or(kind.failure_message());
            self.inner.notifier.notify(NoticeLevel::Error, message);
            return Err(ApiError::Decode("response carried no token".to_owned()));
        };

        let username = granted.username.as_deref().unwrap_or_default();
        self.inner.store.write(token, username);
        self.inner.notifier.notify(NoticeLevel::Success, kind.success_message());
        tracing::info!(username, "signed in");

        // Let the toast render before the page goes away.
        self.inner.timer.sleep(self.inner.config.redirect_delay).await;
        let dashboard = self.inner.config.dashboard_path.clone();
        self.redirect(&dashboard);
        Ok(())
    }

    // =========================================================================
    // DASHBOARD
    // =========================================================================

    /// Dashboard load: confirm the session, then run the page's data loads.
    pub async fn initialize_dashboard(&self, loader: &dyn DashboardLoader) -> GuardState {
        if self.is_initialized() || self.is_redirecting() || self.state() == GuardState::Validating {
            tracing::debug!("dashboard already initialized or initializing");
            return self.state();
        }

        match self.try_initialize(loader).await {
            Ok(()) => {}
            Err(e) if e.is_auth_timeout() => {
                tracing::warn!("dashboard authentication timed out");
                self.inner.notifier.notify(NoticeLevel::Error, MSG_AUTH_TIMEOUT);
                self.inner.timer.sleep(self.inner.config.auth_failure_delay).await;
                self.inner.store.clear();
                let login = self.inner.config.login_path.clone();
                self.redirect(&login);
            }
            Err(e) => {
                tracing::error!(error = %e, "dashboard initialization failed");
                self.inner.notifier.notify(NoticeLevel::Error, MSG_INIT_FAILED);
            }
        }
        self.state()
    }

    async fn try_initialize(&self, loader: &dyn DashboardLoader) -> Result<(), SessionError> {
        let login = self.inner.config.login_path.clone();
        let Some(token) = self.inner.store.read() else {
            tracing::info!("no session token, sending to login");
            self.redirect(&login);
            return Ok(());
        };

        self.set_state(GuardState::Validating);
        let checked = with_timeout(
            self.inner.timer.as_ref(),
            self.inner.config.init_timeout,
            self.inner.validator.check(&token),
        )
        .await;
        if self.is_redirecting() {
            return Ok(());
        }

        match checked {
            Err(_) => {
                self.set_state(GuardState::Uninitialized);
                return Err(AuthError::ValidationTimeout.into());
            }
            Ok(Err(e)) => {
                tracing::info!(error = %e, "session rejected, sending to login");
                self.inner.store.clear();
                if self.on_path(&login) {
                    self.set_state(GuardState::Uninitialized);
                } else {
                    self.redirect(&login);
                }
                return Ok(());
            }
            Ok(Ok(())) => {}
        }

        self.set_state(GuardState::Authenticated);
        self.inner.initialized.set(true);
        loader.prepare()?;
        self.load_page_data(loader).await;
        Ok(())
    }

    async fn load_page_data(&self, loader: &dyn DashboardLoader) {
        self.report_load("categories", loader.load_categories().await);
        self.report_load("budget", loader.load_budget().await);
        loader.apply_view_preference();
        self.report_load("expenses", loader.load_expenses().await);
    }

    fn report_load(&self, resource: &'static str, result: Result<(), ApiError>) {
        if let Err(source) = result {
            let err = SessionError::DataLoad { resource, source };
            tracing::warn!(error = %err, "dashboard data load failed");
            self.inner
                .notifier
                .notify(NoticeLevel::Warning, &format!("Error loading {resource}"));
        }
    }

    /// User-initiated logout behind a confirmation prompt. Returns whether
    /// the user went through with it.
    pub fn logout(&self) -> bool {
        if !self.inner.notifier.confirm(MSG_LOGOUT_CONFIRM) {
            return false;
        }
        self.inner.store.clear();
        self.inner.initialized.set(false);
        self.set_state(GuardState::Uninitialized);
        tracing::info!("logged out");
        let login = self.inner.config.login_path.clone();
        self.redirect(&login);
        true
    }

    // =========================================================================
    // NAVIGATION
    // =========================================================================

    /// Navigate once. Returns `false` if a redirect is already under way.
    fn redirect(&self, path: &str) -> bool {
        if self.is_redirecting() {
            tracing::debug!(path, "redirect suppressed, already redirecting");
            return false;
        }
        self.set_state(GuardState::Redirecting);
        tracing::debug!(path, "redirecting");
        self.inner.navigator.replace(path);
        true
    }

    fn on_path(&self, path: &str) -> bool {
        self.inner.navigator.current_path() == path
    }

    fn set_state(&self, next: GuardState) {
        let prev = self.inner.state.replace(next);
        if prev != next {
            tracing::trace!(from = ?prev, to = ?next, "guard state");
        }
    }
}
