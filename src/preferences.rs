//! Durable UI preferences: theme, expense view and the cached budget.
//!
//! Values are plain strings in the same key/value store as the session
//! token. Unknown or unreadable values read as "unset".

#[cfg(test)]
#[path = "preferences_test.rs"]
mod preferences_test;

use std::rc::Rc;

use crate::storage::KeyValueStore;

pub const THEME_KEY: &str = "theme";
pub const VIEW_KEY: &str = "preferredView";
pub const BUDGET_KEY: &str = "userBudget";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewPreference {
    #[default]
    Card,
    Table,
}

impl ViewPreference {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::Table => "table",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "card" => Some(Self::Card),
            "table" => Some(Self::Table),
            _ => None,
        }
    }
}

#[derive(Clone)]
pub struct Preferences {
    storage: Rc<dyn KeyValueStore>,
}

impl Preferences {
    pub fn new(storage: Rc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    /// Saved theme, else the system preference.
    #[must_use]
    pub fn theme(&self, system_dark: bool) -> Theme {
        self.read(THEME_KEY)
            .and_then(|raw| Theme::parse(&raw))
            .unwrap_or(if system_dark { Theme::Dark } else { Theme::Light })
    }

    pub fn set_theme(&self, theme: Theme) {
        self.write(THEME_KEY, theme.as_str());
    }

    #[must_use]
    pub fn view(&self) -> ViewPreference {
        self.read(VIEW_KEY)
            .and_then(|raw| ViewPreference::parse(&raw))
            .unwrap_or_default()
    }

    pub fn set_view(&self, view: ViewPreference) {
        self.write(VIEW_KEY, view.as_str());
    }

    #[must_use]
    pub fn budget(&self) -> Option<f64> {
        self.read(BUDGET_KEY)
            .and_then(|raw| raw.parse::<f64>().ok())
            .filter(|b| b.is_finite() && *b > 0.0)
    }

    pub fn set_budget(&self, budget: f64) {
        self.write(BUDGET_KEY, &budget.to_string());
    }

    pub fn clear_budget(&self) {
        if let Err(e) = self.storage.remove(BUDGET_KEY) {
            tracing::debug!(error = %e, "budget remove failed");
        }
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.storage.get(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!(key, error = %e, "preference read failed");
                None
            }
        }
    }

    fn write(&self, key: &str, value: &str) {
        if let Err(e) = self.storage.set(key, value) {
            tracing::warn!(key, error = %e, "preference write failed");
        }
    }
}
