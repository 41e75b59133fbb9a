//! Monthly budget arithmetic for the dashboard's budget panel.
//!
//! The budget itself is a client-side number cached under `userBudget` (see
//! [`crate::preferences`]); the backend only supplies the spending total.

#[cfg(test)]
#[path = "budget_test.rs"]
mod budget_test;

/// Share of the budget at which the panel switches to a warning.
pub const WARNING_PERCENT: f64 = 80.0;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BudgetError {
    #[error("Please enter a budget amount")]
    Empty,
    #[error("Please enter a valid positive number")]
    NotPositive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetLevel {
    Healthy,
    Warning,
    Over,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetStatus {
    pub budget: f64,
    pub spent: f64,
    /// Negative once overspent.
    pub remaining: f64,
    /// `0.0` for a zero budget.
    pub percent_used: f64,
}

impl BudgetStatus {
    #[must_use]
    pub fn new(budget: f64, spent: f64) -> Self {
        let percent_used = if budget > 0.0 { spent / budget * 100.0 } else { 0.0 };
        Self { budget, spent, remaining: budget - spent, percent_used }
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.spent > self.budget
    }

    #[must_use]
    pub fn level(&self) -> BudgetLevel {
        if self.is_over() {
            BudgetLevel::Over
        } else if self.percent_used >= WARNING_PERCENT {
            BudgetLevel::Warning
        } else {
            BudgetLevel::Healthy
        }
    }

    /// Progress bar width, clamped to `0..=100`.
    #[must_use]
    pub fn bar_percent(&self) -> f64 {
        self.percent_used.clamp(0.0, 100.0)
    }
}

/// Parse the budget form field.
///
/// # Errors
///
/// [`BudgetError`] for blank, non-numeric, non-finite or non-positive input.
pub fn parse_budget_input(raw: &str) -> Result<f64, BudgetError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(BudgetError::Empty);
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => Ok(value),
        _ => Err(BudgetError::NotPositive),
    }
}
