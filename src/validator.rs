//! Token validation against the backend, bounded and de-duplicated.
//!
//! DESIGN
//! ======
//! At most one validation request is in flight. The first caller starts a
//! shared pending check; callers arriving with the same token while it runs
//! attach to the same handle and receive the exact same result. A caller
//! holding a different token waits for the running check to settle and then
//! validates its own token. The latch only keeps a weak
//! reference, so a check nobody awaits any more is dropped (and with it the
//! network request) instead of pinning the latch.
//!
//! Every outcome other than an explicit success clears the token store.

#[cfg(test)]
#[path = "validator_test.rs"]
mod validator_test;

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use futures::FutureExt;
use futures::future::{LocalBoxFuture, Shared, WeakShared};

use crate::api::AuthApi;
use crate::error::{ApiError, AuthError};
use crate::timeout::{Timer, with_timeout};
use crate::token_store::TokenStore;

type CheckFuture = LocalBoxFuture<'static, Result<(), AuthError>>;
type PendingCheck = Shared<CheckFuture>;
type Latch = Rc<RefCell<Option<(String, WeakShared<CheckFuture>)>>>;

/// Outcome of asking the backend about a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    Valid,
    /// The backend rejected the token.
    Invalid,
    /// Network failure or timeout; nothing is known about the token.
    Indeterminate,
}

impl Validation {
    #[must_use]
    pub fn of(result: &Result<(), AuthError>) -> Self {
        match result {
            Ok(()) => Self::Valid,
            Err(AuthError::InvalidToken | AuthError::NoToken) => Self::Invalid,
            Err(AuthError::ValidationTimeout | AuthError::ValidationNetwork(_)) => Self::Indeterminate,
        }
    }
}

#[derive(Clone)]
pub struct Validator {
    api: Rc<dyn AuthApi>,
    store: TokenStore,
    timer: Rc<dyn Timer>,
    timeout: Duration,
    in_flight: Latch,
}

impl Validator {
    pub fn new(api: Rc<dyn AuthApi>, store: TokenStore, timer: Rc<dyn Timer>, timeout: Duration) -> Self {
        Self { api, store, timer, timeout, in_flight: Rc::new(RefCell::new(None)) }
    }

    /// Whether a validation request is currently outstanding.
    #[must_use]
    pub fn is_validating(&self) -> bool {
        self.pending().is_some()
    }

    /// Collapsed answer: authenticated or not.
    pub async fn validate(&self, token: &str) -> bool {
        self.check(token).await.is_ok()
    }

    /// Validate `token`, joining an in-flight check of the same token if
    /// there is one.
    ///
    /// # Errors
    ///
    /// Returns the [`AuthError`] describing why the session is not
    /// authenticated. The token store has already been cleared.
    pub async fn check(&self, token: &str) -> Result<(), AuthError> {
        loop {
            match self.in_flight_for() {
                Some((held, pending)) if held == token => {
                    tracing::debug!("joining in-flight token validation");
                    return pending.await;
                }
                Some((_, pending)) => {
                    tracing::debug!("waiting for validation of another token");
                    // Only the outcome for our own token counts.
                    let _ = pending.await;
                }
                None => return self.start(token.to_owned()).await,
            }
        }
    }

    fn pending(&self) -> Option<PendingCheck> {
        self.in_flight_for().map(|(_, pending)| pending)
    }

    fn in_flight_for(&self) -> Option<(String, PendingCheck)> {
        let slot = self.in_flight.borrow();
        let (token, weak) = slot.as_ref()?;
        weak.upgrade().map(|pending| (token.clone(), pending))
    }

    fn start(&self, token: String) -> PendingCheck {
        let this = self.clone();
        let held = token.clone();
        let check = async move {
            let _release = LatchRelease(Rc::clone(&this.in_flight));
            let result = this.request(&token).await;
            if let Err(e) = &result {
                tracing::info!(error = %e, "token validation failed, clearing session");
                this.store.clear();
            }
            result
        }
        .boxed_local()
        .shared();

        *self.in_flight.borrow_mut() = check.downgrade().map(|weak| (held, weak));
        check
    }

    async fn request(&self, token: &str) -> Result<(), AuthError> {
        match with_timeout(self.timer.as_ref(), self.timeout, self.api.validate(token)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(ApiError::Status { status, .. })) => {
                tracing::debug!(status, "backend rejected token");
                Err(AuthError::InvalidToken)
            }
            Ok(Err(e)) => Err(AuthError::ValidationNetwork(e.to_string())),
            Err(elapsed) => {
                tracing::warn!(timeout = ?elapsed.0, "token validation timed out");
                Err(AuthError::ValidationTimeout)
            }
        }
    }
}

/// Empties the latch when the check finishes or is dropped unfinished.
struct LatchRelease(Latch);

impl Drop for LatchRelease {
    fn drop(&mut self) {
        if let Ok(mut slot) = self.0.try_borrow_mut() {
            slot.take();
        }
    }
}
