//! Test doubles shared by the crate's unit tests.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use futures::FutureExt;
use futures::future::LocalBoxFuture;

use crate::api::AuthApi;
use crate::error::{ApiError, SessionError};
use crate::guard::{DashboardLoader, Navigator, NoticeLevel, Notifier};
use crate::storage::{MemoryCookieJar, MemoryStore};
use crate::timeout::Timer;
use crate::token_store::TokenStore;
use crate::types::{AuthResponse, LoginRequest, RegisterRequest};

// =============================================================
// Timer
// =============================================================

pub struct TokioTimer;

impl Timer for TokioTimer {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        tokio::time::sleep(duration).boxed_local()
    }
}

/// Paused-clock elapsed check with millisecond slack for timer rounding.
#[track_caller]
pub fn assert_elapsed(start: tokio::time::Instant, expected: Duration) {
    let elapsed = start.elapsed();
    assert!(
        elapsed >= expected && elapsed < expected + Duration::from_millis(5),
        "expected ~{expected:?}, got {elapsed:?}"
    );
}

// =============================================================
// Token store
// =============================================================

pub struct Stores {
    pub tokens: TokenStore,
    pub storage: MemoryStore,
    pub cookies: MemoryCookieJar,
}

pub fn stores() -> Stores {
    let storage = MemoryStore::new();
    let cookies = MemoryCookieJar::new();
    let tokens = TokenStore::new(Rc::new(storage.clone()), Rc::new(cookies.clone()));
    Stores { tokens, storage, cookies }
}

// =============================================================
// Backend
// =============================================================

/// How the fake backend answers a validation call.
#[derive(Clone, Copy, Debug)]
pub enum Verdict {
    Valid,
    Rejected,
    Offline,
    /// Never settles.
    Hang,
}

pub struct FakeAuthApi {
    verdict: Cell<Verdict>,
    latency: Cell<Duration>,
    validate_calls: Cell<usize>,
    accepted: RefCell<Option<String>>,
    sign_in: RefCell<VecDeque<Result<AuthResponse, ApiError>>>,
}

impl FakeAuthApi {
    pub fn new(verdict: Verdict) -> Rc<Self> {
        Rc::new(Self {
            verdict: Cell::new(verdict),
            latency: Cell::new(Duration::from_millis(100)),
            validate_calls: Cell::new(0),
            accepted: RefCell::new(None),
            sign_in: RefCell::new(VecDeque::new()),
        })
    }

    /// Under [`Verdict::Valid`], reject every token except `token`.
    pub fn accept_only(&self, token: &str) {
        *self.accepted.borrow_mut() = Some(token.to_owned());
    }

    pub fn set_latency(&self, latency: Duration) {
        self.latency.set(latency);
    }

    pub fn validate_calls(&self) -> usize {
        self.validate_calls.get()
    }

    /// Queue the answer for the next login/register call.
    pub fn respond_sign_in(&self, response: Result<AuthResponse, ApiError>) {
        self.sign_in.borrow_mut().push_back(response);
    }

    fn next_sign_in(&self) -> Result<AuthResponse, ApiError> {
        self.sign_in
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no scripted response".into())))
    }
}

#[async_trait(?Send)]
impl AuthApi for FakeAuthApi {
    async fn validate(&self, token: &str) -> Result<(), ApiError> {
        self.validate_calls.set(self.validate_calls.get() + 1);
        let verdict = self.verdict.get();
        if matches!(verdict, Verdict::Hang) {
            return futures::future::pending().await;
        }
        tokio::time::sleep(self.latency.get()).await;
        let accepted = self.accepted.borrow().as_deref().is_none_or(|t| t == token);
        match verdict {
            Verdict::Valid if accepted => Ok(()),
            Verdict::Valid | Verdict::Rejected => Err(ApiError::Status { status: 400, message: Some("Invalid token".into()) }),
            Verdict::Offline | Verdict::Hang => Err(ApiError::Network("connection refused".into())),
        }
    }

    async fn login(&self, _request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.next_sign_in()
    }

    async fn register(&self, _request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        self.next_sign_in()
    }
}

pub fn granted(token: &str, username: &str) -> AuthResponse {
    AuthResponse {
        token: Some(token.to_owned()),
        username: Some(username.to_owned()),
        email: None,
        message: None,
    }
}

// =============================================================
// Page host
// =============================================================

pub struct RecordingNavigator {
    path: RefCell<String>,
    visits: RefCell<Vec<String>>,
}

impl RecordingNavigator {
    pub fn at(path: &str) -> Rc<Self> {
        Rc::new(Self { path: RefCell::new(path.to_owned()), visits: RefCell::new(Vec::new()) })
    }

    pub fn visits(&self) -> Vec<String> {
        self.visits.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn current_path(&self) -> String {
        self.path.borrow().clone()
    }

    fn replace(&self, path: &str) {
        self.visits.borrow_mut().push(path.to_owned());
        *self.path.borrow_mut() = path.to_owned();
    }
}

pub struct RecordingNotifier {
    notices: RefCell<Vec<(NoticeLevel, String)>>,
    confirm_answer: Cell<bool>,
    prompts: RefCell<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            notices: RefCell::new(Vec::new()),
            confirm_answer: Cell::new(true),
            prompts: RefCell::new(Vec::new()),
        })
    }

    pub fn answer_confirm(&self, answer: bool) {
        self.confirm_answer.set(answer);
    }

    pub fn notices(&self) -> Vec<(NoticeLevel, String)> {
        self.notices.borrow().clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        self.notices.borrow_mut().push((level, message.to_owned()));
    }

    fn confirm(&self, message: &str) -> bool {
        self.prompts.borrow_mut().push(message.to_owned());
        self.confirm_answer.get()
    }
}

#[derive(Default)]
pub struct RecordingLoader {
    calls: RefCell<Vec<&'static str>>,
    failing: RefCell<Vec<&'static str>>,
    prepare_error: RefCell<Option<String>>,
}

impl RecordingLoader {
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }

    pub fn fail(&self, step: &'static str) {
        self.failing.borrow_mut().push(step);
    }

    pub fn fail_prepare(&self, message: &str) {
        *self.prepare_error.borrow_mut() = Some(message.to_owned());
    }

    async fn step(&self, name: &'static str) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(name);
        tokio::time::sleep(Duration::from_millis(10)).await;
        if self.failing.borrow().contains(&name) {
            return Err(ApiError::Status { status: 500, message: None });
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl DashboardLoader for RecordingLoader {
    fn prepare(&self) -> Result<(), SessionError> {
        self.calls.borrow_mut().push("prepare");
        match self.prepare_error.borrow().clone() {
            Some(message) => Err(SessionError::Initialization(message)),
            None => Ok(()),
        }
    }

    async fn load_categories(&self) -> Result<(), ApiError> {
        self.step("categories").await
    }

    async fn load_budget(&self) -> Result<(), ApiError> {
        self.step("budget").await
    }

    fn apply_view_preference(&self) {
        self.calls.borrow_mut().push("view");
    }

    async fn load_expenses(&self) -> Result<(), ApiError> {
        self.step("expenses").await
    }
}
