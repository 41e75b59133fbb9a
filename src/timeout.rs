//! Timer seam and first-settled-wins timeout race.

#[cfg(test)]
#[path = "timeout_test.rs"]
mod timeout_test;

use std::future::Future;
use std::time::Duration;

use futures::future::{Either, LocalBoxFuture, select};

/// Source of delays (`gloo-timers` in the browser, tokio's clock in tests).
pub trait Timer {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()>;
}

/// The timer won the race.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("timed out after {0:?}")]
pub struct Elapsed(pub Duration);

/// Race `fut` against `limit`. The loser is dropped, which cancels it; a
/// timed-out future never runs to completion in the background.
///
/// # Errors
///
/// Returns [`Elapsed`] if the timer settles first.
pub async fn with_timeout<F>(timer: &dyn Timer, limit: Duration, fut: F) -> Result<F::Output, Elapsed>
where
    F: Future,
{
    let deadline = timer.sleep(limit);
    let fut = std::pin::pin!(fut);
    match select(fut, deadline).await {
        Either::Left((output, _)) => Ok(output),
        Either::Right(((), _)) => Err(Elapsed(limit)),
    }
}
