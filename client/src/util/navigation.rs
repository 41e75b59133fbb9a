//! History-replacing navigation through `window.location`.

use session::Navigator;

#[derive(Clone, Copy, Debug, Default)]
pub struct WindowNavigator;

impl Navigator for WindowNavigator {
    fn current_path(&self) -> String {
        #[cfg(feature = "csr")]
        {
            web_sys::window()
                .and_then(|w| w.location().pathname().ok())
                .unwrap_or_default()
        }
        #[cfg(not(feature = "csr"))]
        {
            String::new()
        }
    }

    fn replace(&self, path: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(window) = web_sys::window() {
                if let Err(e) = window.location().replace(path) {
                    leptos::logging::error!("navigation to {path} failed: {e:?}");
                }
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = path;
        }
    }
}
