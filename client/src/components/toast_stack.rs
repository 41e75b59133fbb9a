//! Fixed-position stack of toast notifications.

use leptos::prelude::*;

use crate::state::toast::{Toast, ToastState, level_class};

#[component]
pub fn ToastStack() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();

    view! {
        <div class="toast-stack" role="status" aria-live="polite">
            <For
                each=move || toasts.get().items
                key=|toast| toast.id
                children=move |toast: Toast| {
                    let id = toast.id;
                    view! {
                        <div
                            class=format!("toast {}", level_class(toast.level))
                            on:click=move |_| toasts.update(|t| t.dismiss(id))
                        >
                            {toast.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
