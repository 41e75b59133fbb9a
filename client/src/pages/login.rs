//! Login page with sign-in and registration forms.
//!
//! SYSTEM CONTEXT
//! ==============
//! On mount the page asks the session guard whether a stored session is
//! still valid and, if so, is replaced by the dashboard. Form submissions go
//! through the guard, which persists the token, shows the toast and
//! redirects after a short delay.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use session::types::{LoginRequest, RegisterRequest};

use crate::state::auth::{AuthFormState, AuthMode};
use crate::state::session::use_session;

pub const MSG_FILL_ALL: &str = "Please fill in all fields";
pub const MSG_PASSWORD_MISMATCH: &str = "Passwords do not match";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submission {
    Login(LoginRequest),
    Register(RegisterRequest),
}

/// Trim the username and require both fields.
///
/// # Errors
///
/// Returns the inline message to show.
pub fn validate_login_input(username: &str, password: &str) -> Result<LoginRequest, &'static str> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(MSG_FILL_ALL);
    }
    Ok(LoginRequest { username: username.to_owned(), password: password.to_owned() })
}

/// Require every field and a matching password confirmation.
///
/// # Errors
///
/// Returns the inline message to show.
pub fn validate_register_input(
    username: &str,
    email: &str,
    password: &str,
    confirm: &str,
) -> Result<RegisterRequest, &'static str> {
    let username = username.trim();
    let email = email.trim();
    if username.is_empty() || email.is_empty() || password.is_empty() || confirm.is_empty() {
        return Err(MSG_FILL_ALL);
    }
    if password != confirm {
        return Err(MSG_PASSWORD_MISMATCH);
    }
    Ok(RegisterRequest { username: username.to_owned(), email: email.to_owned(), password: password.to_owned() })
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session();
    let form = RwSignal::new(AuthFormState::default());
    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());

    #[cfg(feature = "csr")]
    {
        let guard = session.with_value(|s| s.guard.clone());
        leptos::task::spawn_local(async move {
            guard.check_existing_session().await;
        });
    }

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let state = form.get_untracked();
        if state.busy {
            return;
        }
        let prepared = match state.mode {
            AuthMode::Login => {
                validate_login_input(&username.get_untracked(), &password.get_untracked()).map(Submission::Login)
            }
            AuthMode::Register => validate_register_input(
                &username.get_untracked(),
                &email.get_untracked(),
                &password.get_untracked(),
                &confirm.get_untracked(),
            )
            .map(Submission::Register),
        };
        let submission = match prepared {
            Ok(submission) => submission,
            Err(message) => {
                form.update(|f| f.error = Some(message.to_owned()));
                return;
            }
        };
        form.update(|f| {
            f.busy = true;
            f.error = None;
        });

        #[cfg(feature = "csr")]
        {
            let guard = session.with_value(|s| s.guard.clone());
            leptos::task::spawn_local(async move {
                let result = match submission {
                    Submission::Login(request) => guard.login(&request).await,
                    Submission::Register(request) => guard.register(&request).await,
                };
                // On success the page is about to be replaced; stay busy.
                if result.is_err() {
                    form.update(|f| f.busy = false);
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (submission, session);
        }
    };

    let is_register = move || form.get().mode == AuthMode::Register;

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Expense Tracker"</h1>
                <p class="login-card__subtitle">{move || form.get().mode.title()}</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        placeholder="Username"
                        autocomplete="username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <Show when=is_register>
                        <input
                            class="login-input"
                            type="email"
                            placeholder="you@example.com"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                    </Show>
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <Show when=is_register>
                        <input
                            class="login-input"
                            type="password"
                            placeholder="Confirm password"
                            prop:value=move || confirm.get()
                            on:input=move |ev| confirm.set(event_target_value(&ev))
                        />
                    </Show>
                    <button class="login-button" type="submit" disabled=move || form.get().busy>
                        {move || form.get().mode.title()}
                    </button>
                </form>
                <Show when=move || form.get().error.is_some()>
                    <p class="login-message">{move || form.get().error.unwrap_or_default()}</p>
                </Show>
                <button
                    class="login-switch"
                    type="button"
                    on:click=move |_| form.update(AuthFormState::toggle_mode)
                >
                    {move || form.get().mode.switch_prompt()}
                </button>
            </div>
        </div>
    }
}
