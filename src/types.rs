//! Wire DTOs for the `/api/auth` and `/api/expenses` endpoints.
//!
//! DESIGN
//! ======
//! Field names follow the backend's camelCase JSON. Amounts travel as JSON
//! numbers and are held as `f64`; the client only displays and sums them.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// =============================================================================
// AUTH
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Body of every `/api/auth/*` answer. On rejection only `message` is set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct AuthResponse {
    pub token: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

impl AuthResponse {
    /// The issued token, if the response actually granted a session.
    #[must_use]
    pub fn granted_token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }
}

// =============================================================================
// EXPENSES
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentMethod {
    Cash,
    Upi,
}

impl PaymentMethod {
    /// Wire value (`CASH`/`UPI`), also used as the query-string value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cash => "CASH",
            Self::Upi => "UPI",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "CASH" => Some(Self::Cash),
            "UPI" => Some(Self::Upi),
            _ => None,
        }
    }
}

/// A stored expense as returned by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: i64,
    pub amount: f64,
    pub category: String,
    /// `yyyy-MM-dd`.
    pub expense_date: String,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub cash_amount: f64,
    #[serde(default)]
    pub upi_amount: f64,
    #[serde(default)]
    pub upi_vpa: Option<String>,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub payer_name: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Create/update payload.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseDraft {
    pub amount: f64,
    pub category: String,
    pub expense_date: String,
    pub payment_method: PaymentMethod,
    pub upi_vpa: Option<String>,
    pub transaction_id: Option<String>,
    pub payer_name: Option<String>,
    pub notes: Option<String>,
}

impl From<&Expense> for ExpenseDraft {
    fn from(e: &Expense) -> Self {
        Self {
            amount: e.amount,
            category: e.category.clone(),
            expense_date: e.expense_date.clone(),
            payment_method: e.payment_method,
            upi_vpa: e.upi_vpa.clone(),
            transaction_id: e.transaction_id.clone(),
            payer_name: e.payer_name.clone(),
            notes: e.notes.clone(),
        }
    }
}

/// Query filter for `GET /api/expenses` and the CSV export.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpenseFilter {
    pub category: Option<String>,
    pub payment_method: Option<PaymentMethod>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub upi_vpa: Option<String>,
    pub transaction_id: Option<String>,
}

impl ExpenseFilter {
    /// Query-string pairs in backend parameter names; blank values are skipped.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        [
            ("category", self.category.as_deref()),
            ("paymentMethod", self.payment_method.map(PaymentMethod::as_str)),
            ("startDate", self.start_date.as_deref()),
            ("endDate", self.end_date.as_deref()),
            ("upiVpa", self.upi_vpa.as_deref()),
            ("transactionId", self.transaction_id.as_deref()),
        ]
        .into_iter()
        .filter_map(|(name, value)| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| (name, v.to_owned()))
        })
        .collect()
    }

    /// Pairs accepted by the CSV export, which ignores the UPI lookups.
    #[must_use]
    pub fn export_pairs(&self) -> Vec<(&'static str, String)> {
        self.query_pairs()
            .into_iter()
            .filter(|(name, _)| !matches!(*name, "upiVpa" | "transactionId"))
            .collect()
    }
}

/// `GET /api/expenses/summary`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseSummary {
    pub total_amount: f64,
    pub total_cash_amount: f64,
    pub total_upi_amount: f64,
    pub total_transactions: u64,
    #[serde(default)]
    pub category_totals: BTreeMap<String, f64>,
    #[serde(default)]
    pub payment_method_totals: BTreeMap<String, f64>,
}

/// Totals over whatever list is currently displayed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ExpenseStats {
    pub count: usize,
    pub total: f64,
    pub cash_total: f64,
    pub upi_total: f64,
}

impl ExpenseStats {
    #[must_use]
    pub fn of(expenses: &[Expense]) -> Self {
        expenses.iter().fold(Self::default(), |acc, e| Self {
            count: acc.count + 1,
            total: acc.total + e.amount,
            cash_total: acc.cash_total + e.cash_amount,
            upi_total: acc.upi_total + e.upi_amount,
        })
    }
}
