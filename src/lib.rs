//! # session
//!
//! Client-side session guard for the expense tracker front end.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every authenticated page load runs through [`SessionGuard`]: the
//! [`TokenStore`] reads the bearer token, the [`Validator`] asks the backend
//! whether it is still good, and the guard either lets the page load its data
//! or navigates away with history-replacing navigation.
//!
//! The crate is platform-neutral. Browser facilities (localStorage,
//! `document.cookie`, timers, `location.replace`, toasts) are reached through
//! the traits in [`storage`], [`timeout`], [`api`] and [`guard`], which the
//! `client` crate implements with `web-sys` and `gloo`.

pub mod api;
pub mod budget;
pub mod config;
pub mod cookie;
pub mod error;
pub mod guard;
pub mod preferences;
pub mod storage;
pub mod timeout;
pub mod token_store;
pub mod types;
pub mod validator;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{AuthApi, ExpenseApi, bearer};
pub use budget::{BudgetError, BudgetLevel, BudgetStatus, parse_budget_input};
pub use config::GuardConfig;
pub use error::{ApiError, AuthError, ConfigError, SessionError, StorageError};
pub use guard::{DashboardLoader, GuardState, NoticeLevel, Navigator, Notifier, SessionGuard};
pub use preferences::{Preferences, Theme, ViewPreference};
pub use storage::{CookieJar, KeyValueStore};
pub use timeout::{Elapsed, Timer, with_timeout};
pub use token_store::TokenStore;
pub use validator::{Validation, Validator};
