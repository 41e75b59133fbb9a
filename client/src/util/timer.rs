//! Browser [`Timer`] on `gloo-timers`.

use std::time::Duration;

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use session::Timer;

#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTimer;

impl Timer for BrowserTimer {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        #[cfg(feature = "csr")]
        {
            gloo_timers::future::sleep(duration).boxed_local()
        }
        #[cfg(not(feature = "csr"))]
        {
            // No event loop to wake us; never fire.
            let _ = duration;
            futures::future::pending().boxed_local()
        }
    }
}
