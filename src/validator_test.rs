use super::*;
use crate::testing::{FakeAuthApi, Stores, TokioTimer, Verdict, assert_elapsed, stores};
use futures::future::join_all;

fn validator(api: &Rc<FakeAuthApi>, stores: &Stores) -> Validator {
    Validator::new(api.clone(), stores.tokens.clone(), Rc::new(TokioTimer), Duration::from_secs(3))
}

// =============================================================
// outcomes
// =============================================================

#[tokio::test(start_paused = true)]
async fn valid_token_keeps_session() {
    let api = FakeAuthApi::new(Verdict::Valid);
    let s = stores();
    s.tokens.write("tok", "alice");

    assert!(validator(&api, &s).validate("tok").await);
    assert_eq!(s.tokens.read().as_deref(), Some("tok"));
    assert_eq!(api.validate_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn rejected_token_clears_session() {
    let api = FakeAuthApi::new(Verdict::Rejected);
    let s = stores();
    s.tokens.write("tok", "alice");

    let result = validator(&api, &s).check("tok").await;
    assert_eq!(result, Err(AuthError::InvalidToken));
    assert_eq!(Validation::of(&result), Validation::Invalid);
    assert_eq!(s.tokens.read(), None);
    assert_eq!(s.tokens.username(), None);
    assert_eq!(s.cookies.get("authToken"), None);
}

#[tokio::test(start_paused = true)]
async fn network_failure_clears_session() {
    let api = FakeAuthApi::new(Verdict::Offline);
    let s = stores();
    s.tokens.write("tok", "alice");

    let result = validator(&api, &s).check("tok").await;
    assert!(matches!(result, Err(AuthError::ValidationNetwork(_))));
    assert_eq!(Validation::of(&result), Validation::Indeterminate);
    assert_eq!(s.tokens.read(), None);
}

#[tokio::test(start_paused = true)]
async fn hung_validation_times_out_and_clears_session() {
    let api = FakeAuthApi::new(Verdict::Hang);
    let s = stores();
    s.tokens.write("tok", "alice");
    let start = tokio::time::Instant::now();

    let result = validator(&api, &s).check("tok").await;
    assert_eq!(result, Err(AuthError::ValidationTimeout));
    assert_elapsed(start, Duration::from_secs(3));
    assert_eq!(s.tokens.read(), None);
}

#[tokio::test(start_paused = true)]
async fn slow_but_valid_answer_past_timeout_is_failure() {
    let api = FakeAuthApi::new(Verdict::Valid);
    api.set_latency(Duration::from_secs(4));
    let s = stores();
    s.tokens.write("tok", "alice");

    assert!(!validator(&api, &s).validate("tok").await);
    assert_eq!(s.tokens.read(), None);

    // The abandoned request was dropped, so nothing lands later.
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(s.tokens.read(), None);
}

// =============================================================
// de-duplication
// =============================================================

#[tokio::test(start_paused = true)]
async fn concurrent_checks_issue_one_request() {
    let api = FakeAuthApi::new(Verdict::Valid);
    let s = stores();
    s.tokens.write("tok", "alice");
    let v = validator(&api, &s);

    let results = join_all((0..5).map(|_| v.validate("tok"))).await;
    assert_eq!(results, vec![true; 5]);
    assert_eq!(api.validate_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn late_joiners_get_the_leaders_exact_result() {
    let api = FakeAuthApi::new(Verdict::Rejected);
    let s = stores();
    s.tokens.write("tok", "alice");
    let v = validator(&api, &s);

    let results = join_all((0..3).map(|_| v.check("tok"))).await;
    assert!(results.iter().all(|r| *r == Err(AuthError::InvalidToken)));
    assert_eq!(api.validate_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn sequential_checks_each_hit_the_backend() {
    let api = FakeAuthApi::new(Verdict::Valid);
    let s = stores();
    s.tokens.write("tok", "alice");
    let v = validator(&api, &s);

    assert!(v.validate("tok").await);
    assert!(v.validate("tok").await);
    assert_eq!(api.validate_calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn different_token_does_not_borrow_the_leaders_verdict() {
    let api = FakeAuthApi::new(Verdict::Valid);
    api.accept_only("tok");
    let s = stores();
    let v = validator(&api, &s);
    let start = tokio::time::Instant::now();

    let (ours, other) = futures::future::join(v.check("tok"), v.check("forged")).await;
    assert_eq!(ours, Ok(()));
    assert_eq!(other, Err(AuthError::InvalidToken));
    assert_eq!(api.validate_calls(), 2);
    // The second check waits for the first instead of overlapping it.
    assert_elapsed(start, Duration::from_millis(200));
}

#[tokio::test(start_paused = true)]
async fn same_token_joiners_share_despite_a_waiting_stranger() {
    let api = FakeAuthApi::new(Verdict::Valid);
    let s = stores();
    let v = validator(&api, &s);

    let results = join_all([v.check("tok"), v.check("other"), v.check("tok")]).await;
    assert!(results.iter().all(Result::is_ok));
    assert_eq!(api.validate_calls(), 2);
}

// =============================================================
// latch release
// =============================================================

#[tokio::test(start_paused = true)]
async fn latch_is_set_only_while_in_flight() {
    let api = FakeAuthApi::new(Verdict::Valid);
    let s = stores();
    let v = validator(&api, &s);
    assert!(!v.is_validating());

    let mut check = Box::pin(v.validate("tok"));
    assert!(futures::poll!(check.as_mut()).is_pending());
    assert!(v.is_validating());

    assert!(check.await);
    assert!(!v.is_validating());
}

#[tokio::test(start_paused = true)]
async fn latch_is_released_after_timeout() {
    let api = FakeAuthApi::new(Verdict::Hang);
    let s = stores();
    let v = validator(&api, &s);

    assert!(!v.validate("tok").await);
    assert!(!v.is_validating());
}

#[tokio::test(start_paused = true)]
async fn abandoned_check_releases_latch() {
    let api = FakeAuthApi::new(Verdict::Hang);
    let s = stores();
    s.tokens.write("tok", "alice");
    let v = validator(&api, &s);

    let mut check = Box::pin(v.validate("tok"));
    assert!(futures::poll!(check.as_mut()).is_pending());
    assert!(v.is_validating());
    drop(check);

    assert!(!v.is_validating());
    // Dropped before settling: nothing decided, nothing cleared.
    assert_eq!(s.tokens.read().as_deref(), Some("tok"));
}
