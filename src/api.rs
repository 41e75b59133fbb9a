//! Backend contracts consumed by the guard and the dashboard.
//!
//! The REST backend itself is external; these traits are the seam the
//! browser client implements with `gloo-net` and tests implement with fakes.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use async_trait::async_trait;

use crate::error::ApiError;
use crate::types::{AuthResponse, Expense, ExpenseDraft, ExpenseFilter, ExpenseSummary, LoginRequest, RegisterRequest};

pub const AUTHORIZATION: &str = "Authorization";

/// `Authorization` header value for `token`.
#[must_use]
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// `/api/auth/*`.
#[async_trait(?Send)]
pub trait AuthApi {
    /// `POST /api/auth/validate`. `Ok` only on a success status.
    ///
    /// # Errors
    ///
    /// [`ApiError::Status`] when the backend rejects the token, any other
    /// variant when the call itself failed.
    async fn validate(&self, token: &str) -> Result<(), ApiError>;

    /// `POST /api/auth/login`.
    ///
    /// # Errors
    ///
    /// [`ApiError::Status`] carries the server's `{message}` on rejection.
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError>;

    /// `POST /api/auth/register`.
    ///
    /// # Errors
    ///
    /// [`ApiError::Status`] carries the server's `{message}` on rejection.
    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError>;
}

/// `/api/expenses/*`. Every call carries the bearer token.
#[async_trait(?Send)]
pub trait ExpenseApi {
    async fn list_expenses(&self, filter: &ExpenseFilter) -> Result<Vec<Expense>, ApiError>;
    async fn get_expense(&self, id: i64) -> Result<Expense, ApiError>;
    async fn create_expense(&self, draft: &ExpenseDraft) -> Result<Expense, ApiError>;
    async fn update_expense(&self, id: i64, draft: &ExpenseDraft) -> Result<Expense, ApiError>;
    async fn delete_expense(&self, id: i64) -> Result<(), ApiError>;
    async fn categories(&self) -> Result<Vec<String>, ApiError>;
    async fn summary(&self) -> Result<ExpenseSummary, ApiError>;
    /// CSV body for the filtered list.
    async fn export_csv(&self, filter: &ExpenseFilter) -> Result<String, ApiError>;
}
