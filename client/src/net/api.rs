//! REST client for `/api/auth/*` and `/api/expenses/*`.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`, every expense call
//! carrying `Authorization: Bearer <token>` from the token store.
//! Native builds: every call fails with [`ApiError::Network`].
//!
//! ERROR HANDLING
//! ==============
//! Transport failures map to `ApiError::Network`, non-success statuses to
//! `ApiError::Status` with the server's `{message}` when present, and
//! unexpected bodies to `ApiError::Decode`. Nothing here panics.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use async_trait::async_trait;
use session::types::{AuthResponse, Expense, ExpenseDraft, ExpenseFilter, ExpenseSummary, LoginRequest, RegisterRequest};
use session::{ApiError, AuthApi, ExpenseApi, TokenStore};

pub const AUTH_VALIDATE: &str = "/api/auth/validate";
pub const AUTH_LOGIN: &str = "/api/auth/login";
pub const AUTH_REGISTER: &str = "/api/auth/register";
pub const EXPENSES: &str = "/api/expenses";
pub const EXPENSE_CATEGORIES: &str = "/api/expenses/categories";
pub const EXPENSE_SUMMARY: &str = "/api/expenses/summary";
pub const EXPENSE_EXPORT: &str = "/api/expenses/export/csv";

fn expense_endpoint(id: i64) -> String {
    format!("{EXPENSES}/{id}")
}

#[cfg(any(test, not(feature = "csr")))]
fn offline() -> ApiError {
    ApiError::Network("no browser environment".to_owned())
}

pub struct HttpApi {
    tokens: TokenStore,
}

impl HttpApi {
    pub fn new(tokens: TokenStore) -> Self {
        Self { tokens }
    }
}

#[cfg(feature = "csr")]
mod transport {
    use gloo_net::http::{RequestBuilder, Response};
    use serde::de::DeserializeOwned;
    use session::{ApiError, api::AUTHORIZATION};

    pub fn authorized(builder: RequestBuilder, authorization: Option<String>) -> RequestBuilder {
        match authorization {
            Some(value) => builder.header(AUTHORIZATION, &value),
            None => builder,
        }
    }

    pub async fn send(builder: RequestBuilder) -> Result<Response, ApiError> {
        let resp = builder.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
        ensure_ok(resp).await
    }

    pub async fn send_json<B: serde::Serialize>(builder: RequestBuilder, body: &B) -> Result<Response, ApiError> {
        let request = builder.json(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        let resp = request.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
        ensure_ok(resp).await
    }

    async fn ensure_ok(resp: Response) -> Result<Response, ApiError> {
        if resp.ok() {
            return Ok(resp);
        }
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        Err(ApiError::from_error_body(status, &body))
    }

    pub async fn json<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
        resp.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn text(resp: Response) -> Result<String, ApiError> {
        resp.text().await.map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait(?Send)]
impl AuthApi for HttpApi {
    async fn validate(&self, token: &str) -> Result<(), ApiError> {
        #[cfg(feature = "csr")]
        {
            let builder = gloo_net::http::Request::post(AUTH_VALIDATE);
            transport::send(transport::authorized(builder, Some(session::bearer(token)))).await?;
            Ok(())
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = token;
            Err(offline())
        }
    }

    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        #[cfg(feature = "csr")]
        {
            let resp = transport::send_json(gloo_net::http::Request::post(AUTH_LOGIN), request).await?;
            transport::json(resp).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = request;
            Err(offline())
        }
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        #[cfg(feature = "csr")]
        {
            let resp = transport::send_json(gloo_net::http::Request::post(AUTH_REGISTER), request).await?;
            transport::json(resp).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = request;
            Err(offline())
        }
    }
}

#[async_trait(?Send)]
impl ExpenseApi for HttpApi {
    async fn list_expenses(&self, filter: &ExpenseFilter) -> Result<Vec<Expense>, ApiError> {
        #[cfg(feature = "csr")]
        {
            let builder = gloo_net::http::Request::get(EXPENSES).query(filter.query_pairs());
            let resp = transport::send(transport::authorized(builder, self.tokens.authorization())).await?;
            transport::json(resp).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (filter, &self.tokens);
            Err(offline())
        }
    }

    async fn get_expense(&self, id: i64) -> Result<Expense, ApiError> {
        #[cfg(feature = "csr")]
        {
            let builder = gloo_net::http::Request::get(&expense_endpoint(id));
            let resp = transport::send(transport::authorized(builder, self.tokens.authorization())).await?;
            transport::json(resp).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = expense_endpoint(id);
            Err(offline())
        }
    }

    async fn create_expense(&self, draft: &ExpenseDraft) -> Result<Expense, ApiError> {
        #[cfg(feature = "csr")]
        {
            let builder = transport::authorized(gloo_net::http::Request::post(EXPENSES), self.tokens.authorization());
            let resp = transport::send_json(builder, draft).await?;
            transport::json(resp).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = draft;
            Err(offline())
        }
    }

    async fn update_expense(&self, id: i64, draft: &ExpenseDraft) -> Result<Expense, ApiError> {
        #[cfg(feature = "csr")]
        {
            let builder = transport::authorized(
                gloo_net::http::Request::put(&expense_endpoint(id)),
                self.tokens.authorization(),
            );
            let resp = transport::send_json(builder, draft).await?;
            transport::json(resp).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (id, draft);
            Err(offline())
        }
    }

    async fn delete_expense(&self, id: i64) -> Result<(), ApiError> {
        #[cfg(feature = "csr")]
        {
            let builder = gloo_net::http::Request::delete(&expense_endpoint(id));
            transport::send(transport::authorized(builder, self.tokens.authorization())).await?;
            Ok(())
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = id;
            Err(offline())
        }
    }

    async fn categories(&self) -> Result<Vec<String>, ApiError> {
        #[cfg(feature = "csr")]
        {
            let builder = gloo_net::http::Request::get(EXPENSE_CATEGORIES);
            let resp = transport::send(transport::authorized(builder, self.tokens.authorization())).await?;
            transport::json(resp).await
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(offline())
        }
    }

    async fn summary(&self) -> Result<ExpenseSummary, ApiError> {
        #[cfg(feature = "csr")]
        {
            let builder = gloo_net::http::Request::get(EXPENSE_SUMMARY);
            let resp = transport::send(transport::authorized(builder, self.tokens.authorization())).await?;
            transport::json(resp).await
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(offline())
        }
    }

    async fn export_csv(&self, filter: &ExpenseFilter) -> Result<String, ApiError> {
        #[cfg(feature = "csr")]
        {
            let builder = gloo_net::http::Request::get(EXPENSE_EXPORT).query(filter.export_pairs());
            let resp = transport::send(transport::authorized(builder, self.tokens.authorization())).await?;
            transport::text(resp).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = filter;
            Err(offline())
        }
    }
}
