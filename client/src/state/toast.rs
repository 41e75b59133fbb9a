//! Toast notifications and the browser confirmation prompt.
//!
//! DESIGN
//! ======
//! `ToastState` is plain data so ordering and expiry are unit-testable;
//! `ToastNotifier` is the `Notifier` the session guard talks to.

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

use leptos::prelude::*;
use session::{NoticeLevel, Notifier};

/// How long a toast stays on screen.
pub const TOAST_TTL_MS: u64 = 3_000;
/// Older toasts are dropped beyond this many.
pub const MAX_VISIBLE: usize = 4;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub level: NoticeLevel,
    pub message: String,
}

#[derive(Clone, Debug, Default)]
pub struct ToastState {
    pub items: Vec<Toast>,
    next_id: u64,
}

impl ToastState {
    /// Append a toast and return its id.
    pub fn push(&mut self, level: NoticeLevel, message: &str) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Toast { id, level, message: message.to_owned() });
        if self.items.len() > MAX_VISIBLE {
            let excess = self.items.len() - MAX_VISIBLE;
            self.items.drain(..excess);
        }
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|t| t.id != id);
    }
}

/// CSS modifier for a toast's level.
pub fn level_class(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Success => "toast--success",
        NoticeLevel::Info => "toast--info",
        NoticeLevel::Warning => "toast--warning",
        NoticeLevel::Error => "toast--error",
    }
}

/// [`Notifier`] backed by the toast signal and `window.confirm`.
#[derive(Clone, Copy)]
pub struct ToastNotifier {
    toasts: RwSignal<ToastState>,
}

impl ToastNotifier {
    pub fn new(toasts: RwSignal<ToastState>) -> Self {
        Self { toasts }
    }
}

impl Notifier for ToastNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        let mut id = 0;
        self.toasts.update(|t| id = t.push(level, message));

        #[cfg(feature = "csr")]
        {
            let toasts = self.toasts;
            leptos::task::spawn_local(async move {
                gloo_timers::future::sleep(std::time::Duration::from_millis(TOAST_TTL_MS)).await;
                toasts.update(|t| t.dismiss(id));
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = id;
        }
    }

    fn confirm(&self, message: &str) -> bool {
        #[cfg(feature = "csr")]
        {
            web_sys::window()
                .and_then(|w| w.confirm_with_message(message).ok())
                .unwrap_or(false)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = message;
            false
        }
    }
}
