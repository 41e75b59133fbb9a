//! Session guard configuration: timeouts, delays, cookie lifetime, routes.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_LOGIN_PATH: &str = "/login.html";
pub const DEFAULT_DASHBOARD_PATH: &str = "/dashboard";
pub const DEFAULT_VALIDATION_TIMEOUT_MS: u64 = 3_000;
pub const DEFAULT_INIT_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_REDIRECT_DELAY_MS: u64 = 1_000;
pub const DEFAULT_AUTH_FAILURE_DELAY_MS: u64 = 2_000;
/// Seven days.
pub const DEFAULT_COOKIE_MAX_AGE_SECS: u64 = 604_800;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardConfig {
    /// Unauthenticated entry page.
    pub login_path: String,
    /// Authenticated entry page.
    pub dashboard_path: String,
    /// Bound on one network validation call.
    pub validation_timeout: Duration,
    /// Outer bound on the dashboard's whole validation step, including time
    /// spent waiting on a validation that was already in flight.
    pub init_timeout: Duration,
    /// Pause between a successful sign-in toast and the dashboard redirect.
    pub redirect_delay: Duration,
    /// Pause between the auth-timeout toast and the login redirect.
    pub auth_failure_delay: Duration,
    pub cookie_max_age_secs: u64,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            login_path: DEFAULT_LOGIN_PATH.to_owned(),
            dashboard_path: DEFAULT_DASHBOARD_PATH.to_owned(),
            validation_timeout: Duration::from_millis(DEFAULT_VALIDATION_TIMEOUT_MS),
            init_timeout: Duration::from_millis(DEFAULT_INIT_TIMEOUT_MS),
            redirect_delay: Duration::from_millis(DEFAULT_REDIRECT_DELAY_MS),
            auth_failure_delay: Duration::from_millis(DEFAULT_AUTH_FAILURE_DELAY_MS),
            cookie_max_age_secs: DEFAULT_COOKIE_MAX_AGE_SECS,
        }
    }
}

impl GuardConfig {
    /// Build config from a key lookup, falling back to defaults.
    ///
    /// Optional:
    /// - `GUARD_VALIDATION_TIMEOUT_MS`: default 3000
    /// - `GUARD_INIT_TIMEOUT_MS`: default 5000
    /// - `GUARD_REDIRECT_DELAY_MS`: default 1000
    /// - `GUARD_AUTH_FAILURE_DELAY_MS`: default 2000
    /// - `GUARD_COOKIE_MAX_AGE_SECS`: default 604800
    /// - `GUARD_LOGIN_PATH`: default `/login.html`
    /// - `GUARD_DASHBOARD_PATH`: default `/dashboard`
    ///
    /// Unparseable numbers fall back to their default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::RelativePath`] if a path override does not start with `/`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let millis = |key: &str, default: u64| Duration::from_millis(parse_u64(&lookup, key, default));

        Ok(Self {
            login_path: parse_path(&lookup, "GUARD_LOGIN_PATH", DEFAULT_LOGIN_PATH)?,
            dashboard_path: parse_path(&lookup, "GUARD_DASHBOARD_PATH", DEFAULT_DASHBOARD_PATH)?,
            validation_timeout: millis("GUARD_VALIDATION_TIMEOUT_MS", DEFAULT_VALIDATION_TIMEOUT_MS),
            init_timeout: millis("GUARD_INIT_TIMEOUT_MS", DEFAULT_INIT_TIMEOUT_MS),
            redirect_delay: millis("GUARD_REDIRECT_DELAY_MS", DEFAULT_REDIRECT_DELAY_MS),
            auth_failure_delay: millis("GUARD_AUTH_FAILURE_DELAY_MS", DEFAULT_AUTH_FAILURE_DELAY_MS),
            cookie_max_age_secs: parse_u64(&lookup, "GUARD_COOKIE_MAX_AGE_SECS", DEFAULT_COOKIE_MAX_AGE_SECS),
        })
    }

    /// Resolve overrides baked in at build time (`GUARD_*` env vars seen by
    /// the compiler). The browser has no process environment to read.
    ///
    /// # Errors
    ///
    /// Same as [`GuardConfig::from_lookup`].
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| build_env(key).map(str::to_owned))
    }
}

fn build_env(key: &str) -> Option<&'static str> {
    match key {
        "GUARD_VALIDATION_TIMEOUT_MS" => option_env!("GUARD_VALIDATION_TIMEOUT_MS"),
        "GUARD_INIT_TIMEOUT_MS" => option_env!("GUARD_INIT_TIMEOUT_MS"),
        "GUARD_REDIRECT_DELAY_MS" => option_env!("GUARD_REDIRECT_DELAY_MS"),
        "GUARD_AUTH_FAILURE_DELAY_MS" => option_env!("GUARD_AUTH_FAILURE_DELAY_MS"),
        "GUARD_COOKIE_MAX_AGE_SECS" => option_env!("GUARD_COOKIE_MAX_AGE_SECS"),
        "GUARD_LOGIN_PATH" => option_env!("GUARD_LOGIN_PATH"),
        "GUARD_DASHBOARD_PATH" => option_env!("GUARD_DASHBOARD_PATH"),
        _ => None,
    }
}

fn parse_u64<F>(lookup: &F, key: &str, default: u64) -> u64
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

fn parse_path<F>(lookup: &F, key: &'static str, default: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).map(|v| v.trim().to_owned()) {
        None => Ok(default.to_owned()),
        Some(v) if v.is_empty() => Ok(default.to_owned()),
        Some(v) if v.starts_with('/') => Ok(v),
        Some(v) => Err(ConfigError::RelativePath { key, value: v }),
    }
}
