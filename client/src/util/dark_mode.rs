//! Theme initialization and toggle.
//!
//! Reads the saved `theme` through [`Preferences`], falling back to the
//! system `prefers-color-scheme`, and applies a `data-theme` attribute to the
//! `<html>` element. Toggle writes the new theme back.
//!
//! TRADE-OFFS
//! ==========
//! Preference persistence is best-effort browser-only behavior; native builds
//! no-op the DOM side.

#[cfg(test)]
#[path = "dark_mode_test.rs"]
mod dark_mode_test;

use session::{Preferences, Theme};

/// Whether the system prefers a dark color scheme.
pub fn system_prefers_dark() -> bool {
    #[cfg(feature = "csr")]
    {
        web_sys::window()
            .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
            .map_or(false, |mq| mq.matches())
    }
    #[cfg(not(feature = "csr"))]
    {
        false
    }
}

/// Saved theme, else the system preference.
pub fn read_preference(prefs: &Preferences) -> Theme {
    prefs.theme(system_prefers_dark())
}

/// Apply the `data-theme` attribute on the `<html>` element.
pub fn apply(theme: Theme) {
    #[cfg(feature = "csr")]
    {
        if let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
        {
            let _ = el.set_attribute("data-theme", theme.as_str());
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = theme;
    }
}

/// Flip the theme, apply it and persist it.
pub fn toggle(prefs: &Preferences, current: Theme) -> Theme {
    let next = current.toggled();
    apply(next);
    prefs.set_theme(next);
    next
}

/// Toolbar glyph offering the other theme.
pub fn toggle_glyph(current: Theme) -> &'static str {
    match current {
        Theme::Light => "☾",
        Theme::Dark => "☀",
    }
}
