use super::*;
use crate::testing::TokioTimer;
use std::cell::Cell;

#[tokio::test(start_paused = true)]
async fn fast_future_wins() {
    let out = with_timeout(&TokioTimer, Duration::from_secs(3), async {
        tokio::time::sleep(Duration::from_millis(500)).await;
        7
    })
    .await;
    assert_eq!(out, Ok(7));
}

#[tokio::test(start_paused = true)]
async fn slow_future_loses_at_the_limit() {
    let start = tokio::time::Instant::now();
    let out = with_timeout(&TokioTimer, Duration::from_secs(3), futures::future::pending::<()>()).await;
    assert_eq!(out, Err(Elapsed(Duration::from_secs(3))));
    assert_eq!(start.elapsed(), Duration::from_secs(3));
}

#[tokio::test(start_paused = true)]
async fn loser_never_completes_after_timeout() {
    let finished = Cell::new(false);
    let out = with_timeout(&TokioTimer, Duration::from_secs(1), async {
        tokio::time::sleep(Duration::from_secs(2)).await;
        finished.set(true);
    })
    .await;
    assert!(out.is_err());

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert!(!finished.get());
}
