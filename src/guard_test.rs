use super::*;
use crate::testing::{
    FakeAuthApi, RecordingLoader, RecordingNavigator, RecordingNotifier, Stores, TokioTimer, Verdict, assert_elapsed,
    granted, stores,
};
use crate::storage::{CookieJar, KeyValueStore};
use futures::future::join;
use std::time::Duration;
use tokio::task::LocalSet;

struct Page {
    guard: SessionGuard,
    api: Rc<FakeAuthApi>,
    stores: Stores,
    nav: Rc<RecordingNavigator>,
    notifier: Rc<RecordingNotifier>,
}

fn page_with(path: &str, verdict: Verdict, config: GuardConfig) -> Page {
    let api = FakeAuthApi::new(verdict);
    let stores = stores();
    let nav = RecordingNavigator::at(path);
    let notifier = RecordingNotifier::new();
    let guard = SessionGuard::new(
        config,
        stores.tokens.clone(),
        api.clone(),
        nav.clone(),
        notifier.clone(),
        Rc::new(TokioTimer),
    );
    Page { guard, api, stores, nav, notifier }
}

fn page(path: &str, verdict: Verdict) -> Page {
    page_with(path, verdict, GuardConfig::default())
}

fn login_request() -> LoginRequest {
    LoginRequest { username: "alice".into(), password: "secret".into() }
}

const FULL_LOAD: [&str; 5] = ["prepare", "categories", "budget", "view", "expenses"];

// =============================================================
// login page
// =============================================================

#[tokio::test(start_paused = true)]
async fn login_page_forwards_valid_session_to_dashboard() {
    let p = page("/login.html", Verdict::Valid);
    p.stores.tokens.write("tok", "alice");

    let state = p.guard.check_existing_session().await;
    assert_eq!(state, GuardState::Redirecting);
    assert_eq!(p.nav.visits(), vec!["/dashboard"]);
    assert_eq!(p.stores.tokens.read().as_deref(), Some("tok"));
}

#[tokio::test(start_paused = true)]
async fn login_page_without_token_stays_put() {
    let p = page("/login.html", Verdict::Valid);

    let state = p.guard.check_existing_session().await;
    assert_eq!(state, GuardState::Uninitialized);
    assert_eq!(p.api.validate_calls(), 0);
    assert!(p.nav.visits().is_empty());
}

#[tokio::test(start_paused = true)]
async fn login_page_with_rejected_token_clears_and_stays() {
    let p = page("/login.html", Verdict::Rejected);
    p.stores.tokens.write("stale", "alice");

    let state = p.guard.check_existing_session().await;
    assert_eq!(state, GuardState::Uninitialized);
    assert_eq!(p.stores.tokens.read(), None);
    assert!(p.nav.visits().is_empty());
}

#[tokio::test(start_paused = true)]
async fn login_page_restores_token_from_cookie() {
    let p = page("/login.html", Verdict::Valid);
    p.stores.cookies.write("authToken=from-cookie; path=/").unwrap();

    p.guard.check_existing_session().await;
    assert_eq!(p.nav.visits(), vec!["/dashboard"]);
    assert_eq!(p.stores.storage.get("authToken").unwrap().as_deref(), Some("from-cookie"));
}

#[tokio::test(start_paused = true)]
async fn overlapping_session_checks_validate_once() {
    let p = page("/login.html", Verdict::Valid);
    p.stores.tokens.write("tok", "alice");

    let (first, second) = join(p.guard.check_existing_session(), p.guard.check_existing_session()).await;
    assert_eq!(first, GuardState::Redirecting);
    assert_eq!(second, GuardState::Validating);
    assert_eq!(p.api.validate_calls(), 1);
    assert_eq!(p.nav.visits(), vec!["/dashboard"]);
}

// =============================================================
// sign-in
// =============================================================

#[tokio::test(start_paused = true)]
async fn login_success_persists_then_redirects_after_delay() {
    let p = page("/login.html", Verdict::Valid);
    p.api.respond_sign_in(Ok(granted("fresh", "alice")));
    let start = tokio::time::Instant::now();

    LocalSet::new()
        .run_until(async {
            let guard = p.guard.clone();
            let handle = tokio::task::spawn_local(async move { guard.login(&login_request()).await });

            tokio::time::sleep(Duration::from_millis(999)).await;
            assert_eq!(p.stores.tokens.read().as_deref(), Some("fresh"));
            assert_eq!(p.notifier.notices(), vec![(NoticeLevel::Success, MSG_LOGIN_SUCCESS.to_owned())]);
            assert!(p.nav.visits().is_empty());

            assert_eq!(handle.await.unwrap(), Ok(()));
        })
        .await;

    assert_elapsed(start, Duration::from_secs(1));
    assert_eq!(p.nav.visits(), vec!["/dashboard"]);
    assert_eq!(p.stores.tokens.username().as_deref(), Some("alice"));
    assert_eq!(p.stores.cookies.get("authToken").as_deref(), Some("fresh"));
}

#[tokio::test(start_paused = true)]
async fn register_success_uses_its_own_message() {
    let p = page("/login.html", Verdict::Valid);
    p.api.respond_sign_in(Ok(granted("fresh", "bob")));

    let request = RegisterRequest { username: "bob".into(), email: "bob@example.com".into(), password: "pw".into() };
    assert_eq!(p.guard.register(&request).await, Ok(()));
    assert_eq!(p.notifier.notices(), vec![(NoticeLevel::Success, MSG_REGISTER_SUCCESS.to_owned())]);
    assert_eq!(p.nav.visits(), vec!["/dashboard"]);
}

#[tokio::test(start_paused = true)]
async fn rejected_login_shows_server_message() {
    let p = page("/login.html", Verdict::Valid);
    p.api.respond_sign_in(Err(ApiError::Status { status: 401, message: Some("Invalid credentials".into()) }));

    assert!(p.guard.login(&login_request()).await.is_err());
    assert_eq!(p.notifier.notices(), vec![(NoticeLevel::Error, "Invalid credentials".to_owned())]);
    assert_eq!(p.stores.tokens.read(), None);
    assert!(p.nav.visits().is_empty());
}

#[tokio::test(start_paused = true)]
async fn rejected_login_without_message_uses_fallback() {
    let p = page("/login.html", Verdict::Valid);
    p.api.respond_sign_in(Err(ApiError::Status { status: 500, message: None }));

    assert!(p.guard.login(&login_request()).await.is_err());
    assert_eq!(p.notifier.notices(), vec![(NoticeLevel::Error, MSG_LOGIN_FAILED.to_owned())]);
}

#[tokio::test(start_paused = true)]
async fn unreachable_backend_shows_network_error() {
    let p = page("/login.html", Verdict::Valid);
    p.api.respond_sign_in(Err(ApiError::Network("offline".into())));

    assert!(p.guard.login(&login_request()).await.is_err());
    assert_eq!(p.notifier.notices(), vec![(NoticeLevel::Error, MSG_NETWORK_ERROR.to_owned())]);
}

#[tokio::test(start_paused = true)]
async fn success_status_without_token_is_a_failure() {
    let p = page("/login.html", Verdict::Valid);
    let response = AuthResponse { message: Some("Username already exists".into()), ..AuthResponse::default() };
    p.api.respond_sign_in(Ok(response));

    let request = RegisterRequest { username: "bob".into(), email: "bob@example.com".into(), password: "pw".into() };
    assert!(p.guard.register(&request).await.is_err());
    assert_eq!(p.notifier.notices(), vec![(NoticeLevel::Error, "Username already exists".to_owned())]);
    assert_eq!(p.stores.tokens.read(), None);
    assert!(p.nav.visits().is_empty());
}

// =============================================================
// dashboard
// =============================================================

#[tokio::test(start_paused = true)]
async fn dashboard_with_valid_session_loads_data_in_order() {
    let p = page("/dashboard", Verdict::Valid);
    p.stores.tokens.write("tok", "alice");
    let loader = RecordingLoader::default();

    let state = p.guard.initialize_dashboard(&loader).await;
    assert_eq!(state, GuardState::Authenticated);
    assert!(p.guard.is_initialized());
    assert_eq!(loader.calls(), FULL_LOAD);
    assert!(p.nav.visits().is_empty());
    assert!(p.notifier.notices().is_empty());
}

#[tokio::test(start_paused = true)]
async fn dashboard_without_token_redirects_without_network() {
    let p = page("/dashboard", Verdict::Valid);
    let loader = RecordingLoader::default();

    let state = p.guard.initialize_dashboard(&loader).await;
    assert_eq!(state, GuardState::Redirecting);
    assert_eq!(p.nav.visits(), vec!["/login.html"]);
    assert_eq!(p.api.validate_calls(), 0);
    assert!(loader.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn dashboard_with_rejected_token_clears_and_redirects() {
    let p = page("/dashboard", Verdict::Rejected);
    p.stores.tokens.write("stale", "alice");
    let loader = RecordingLoader::default();

    p.guard.initialize_dashboard(&loader).await;
    assert_eq!(p.nav.visits(), vec!["/login.html"]);
    assert_eq!(p.stores.tokens.read(), None);
    assert_eq!(p.stores.cookies.get("authToken"), None);
    assert!(loader.calls().is_empty());
    assert!(!p.guard.is_initialized());
}

#[tokio::test(start_paused = true)]
async fn hung_validation_redirects_when_validation_bound_expires() {
    let p = page("/dashboard", Verdict::Hang);
    p.stores.tokens.write("tok", "alice");
    let loader = RecordingLoader::default();
    let start = tokio::time::Instant::now();

    p.guard.initialize_dashboard(&loader).await;
    assert_elapsed(start, Duration::from_secs(3));
    assert_eq!(p.nav.visits(), vec!["/login.html"]);
    assert_eq!(p.stores.tokens.read(), None);
}

#[tokio::test(start_paused = true)]
async fn outer_timeout_notifies_then_redirects_after_delay() {
    let config = GuardConfig { validation_timeout: Duration::from_secs(30), ..GuardConfig::default() };
    let p = page_with("/dashboard", Verdict::Hang, config);
    p.stores.tokens.write("tok", "alice");
    let loader = Rc::new(RecordingLoader::default());
    let start = tokio::time::Instant::now();

    LocalSet::new()
        .run_until(async {
            let guard = p.guard.clone();
            let task_loader = Rc::clone(&loader);
            let handle = tokio::task::spawn_local(async move { guard.initialize_dashboard(task_loader.as_ref()).await });

            tokio::time::sleep(Duration::from_millis(5_500)).await;
            assert_eq!(p.notifier.notices(), vec![(NoticeLevel::Error, MSG_AUTH_TIMEOUT.to_owned())]);
            assert!(p.nav.visits().is_empty());
            assert!(!p.guard.validator().is_validating());

            assert_eq!(handle.await.unwrap(), GuardState::Redirecting);
        })
        .await;

    assert_elapsed(start, Duration::from_secs(7));
    assert_eq!(p.nav.visits(), vec!["/login.html"]);
    assert_eq!(p.stores.tokens.read(), None);
    assert!(loader.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn second_initialize_is_a_no_op() {
    let p = page("/dashboard", Verdict::Valid);
    p.stores.tokens.write("tok", "alice");
    let loader = RecordingLoader::default();

    p.guard.initialize_dashboard(&loader).await;
    p.guard.initialize_dashboard(&loader).await;
    assert_eq!(p.api.validate_calls(), 1);
    assert_eq!(loader.calls(), FULL_LOAD);
}

#[tokio::test(start_paused = true)]
async fn concurrent_initialize_runs_the_loads_once() {
    let p = page("/dashboard", Verdict::Valid);
    p.stores.tokens.write("tok", "alice");
    let loader = RecordingLoader::default();

    let (first, second) = join(p.guard.initialize_dashboard(&loader), p.guard.initialize_dashboard(&loader)).await;
    assert_eq!(first, GuardState::Authenticated);
    assert_eq!(second, GuardState::Validating);
    assert_eq!(p.api.validate_calls(), 1);
    assert_eq!(loader.calls(), FULL_LOAD);
}

#[tokio::test(start_paused = true)]
async fn failed_data_load_warns_and_keeps_going() {
    let p = page("/dashboard", Verdict::Valid);
    p.stores.tokens.write("tok", "alice");
    let loader = RecordingLoader::default();
    loader.fail("categories");

    let state = p.guard.initialize_dashboard(&loader).await;
    assert_eq!(state, GuardState::Authenticated);
    assert_eq!(loader.calls(), FULL_LOAD);
    assert_eq!(p.notifier.notices(), vec![(NoticeLevel::Warning, "Error loading categories".to_owned())]);
    assert_eq!(p.stores.tokens.read().as_deref(), Some("tok"));
    assert!(p.nav.visits().is_empty());
}

#[tokio::test(start_paused = true)]
async fn setup_failure_leaves_page_without_navigation() {
    let p = page("/dashboard", Verdict::Valid);
    p.stores.tokens.write("tok", "alice");
    let loader = RecordingLoader::default();
    loader.fail_prepare("missing element");

    let state = p.guard.initialize_dashboard(&loader).await;
    assert_eq!(state, GuardState::Authenticated);
    assert_eq!(loader.calls(), vec!["prepare"]);
    assert_eq!(p.notifier.notices(), vec![(NoticeLevel::Error, MSG_INIT_FAILED.to_owned())]);
    assert_eq!(p.stores.tokens.read().as_deref(), Some("tok"));
    assert!(p.nav.visits().is_empty());
}

#[tokio::test(start_paused = true)]
async fn redirect_happens_at_most_once() {
    let p = page("/dashboard", Verdict::Rejected);
    p.stores.tokens.write("stale", "alice");
    let loader = RecordingLoader::default();

    p.guard.initialize_dashboard(&loader).await;
    p.stores.tokens.write("again", "alice");
    p.guard.initialize_dashboard(&loader).await;
    p.guard.check_existing_session().await;
    assert_eq!(p.nav.visits(), vec!["/login.html"]);
    assert_eq!(p.api.validate_calls(), 1);
}

// =============================================================
// logout
// =============================================================

#[tokio::test(start_paused = true)]
async fn confirmed_logout_clears_and_redirects() {
    let p = page("/dashboard", Verdict::Valid);
    p.stores.tokens.write("tok", "alice");
    p.guard.initialize_dashboard(&RecordingLoader::default()).await;

    assert!(p.guard.logout());
    assert_eq!(p.notifier.prompts(), vec![MSG_LOGOUT_CONFIRM]);
    assert_eq!(p.stores.tokens.read(), None);
    assert_eq!(p.stores.tokens.username(), None);
    assert!(!p.guard.is_initialized());
    assert_eq!(p.guard.state(), GuardState::Redirecting);
    assert_eq!(p.nav.visits(), vec!["/login.html"]);
}

#[tokio::test(start_paused = true)]
async fn declined_logout_changes_nothing() {
    let p = page("/dashboard", Verdict::Valid);
    p.stores.tokens.write("tok", "alice");
    p.guard.initialize_dashboard(&RecordingLoader::default()).await;
    p.notifier.answer_confirm(false);

    assert!(!p.guard.logout());
    assert_eq!(p.stores.tokens.read().as_deref(), Some("tok"));
    assert!(p.guard.is_initialized());
    assert_eq!(p.guard.state(), GuardState::Authenticated);
    assert!(p.nav.visits().is_empty());
}

// =============================================================
// configuration
// =============================================================

#[tokio::test(start_paused = true)]
async fn cookie_lifetime_follows_config() {
    let config = GuardConfig { cookie_max_age_secs: 60, ..GuardConfig::default() };
    let p = page_with("/login.html", Verdict::Valid, config);
    p.api.respond_sign_in(Ok(granted("fresh", "alice")));

    p.guard.login(&login_request()).await.unwrap();
    assert!(p.stores.cookies.written().iter().any(|d| d.contains("max-age=60")));
}
