//! Dashboard keyboard shortcuts.
//!
//! `Ctrl`/`Cmd` + `N` focuses the amount field, `+ E` exports the current
//! list and `+ D` opens the summary. `Escape` closes the summary or, when it
//! is not open, cancels the edit in progress.

#[cfg(test)]
#[path = "shortcuts_test.rs"]
mod shortcuts_test;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shortcut {
    NewExpense,
    Export,
    Summary,
    Dismiss,
}

impl Shortcut {
    /// Modifier shortcuts shadow browser bindings (new window, bookmark).
    pub fn prevents_default(self) -> bool {
        !matches!(self, Self::Dismiss)
    }
}

/// Map a `keydown` to a dashboard shortcut.
pub fn shortcut_for(key: &str, ctrl: bool, meta: bool) -> Option<Shortcut> {
    if key == "Escape" {
        return Some(Shortcut::Dismiss);
    }
    if !(ctrl || meta) {
        return None;
    }
    match key.to_ascii_lowercase().as_str() {
        "n" => Some(Shortcut::NewExpense),
        "e" => Some(Shortcut::Export),
        "d" => Some(Shortcut::Summary),
        _ => None,
    }
}

/// Move keyboard focus to the element with `id`, if it is on the page.
pub fn focus(id: &str) {
    #[cfg(feature = "csr")]
    {
        use wasm_bindgen::JsCast;

        let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
            .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
        else {
            return;
        };
        if let Err(e) = el.focus() {
            leptos::logging::warn!("focus failed: {e:?}");
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = id;
    }
}
