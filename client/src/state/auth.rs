//! Login page form state.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session itself lives in `session::TokenStore`; this only tracks which
//! form is shown and whether a submission is outstanding.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

impl AuthMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Login => Self::Register,
            Self::Register => Self::Login,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Login => "Sign In",
            Self::Register => "Create Account",
        }
    }

    pub fn switch_prompt(self) -> &'static str {
        match self {
            Self::Login => "Don't have an account? Register",
            Self::Register => "Already have an account? Sign in",
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AuthFormState {
    pub mode: AuthMode,
    /// A login/register request is in flight; further submits are ignored.
    pub busy: bool,
    /// Inline validation message under the form.
    pub error: Option<String>,
}

impl AuthFormState {
    /// Switch between login and register, dropping any stale message.
    pub fn toggle_mode(&mut self) {
        if self.busy {
            return;
        }
        self.mode = self.mode.toggled();
        self.error = None;
    }
}
