//! Dashboard data: expense list, categories, filter, view and budget.

#[cfg(test)]
#[path = "expenses_test.rs"]
mod expenses_test;

use session::types::{Expense, ExpenseFilter, ExpenseStats, ExpenseSummary};
use session::{BudgetStatus, ViewPreference};

#[derive(Clone, Debug, Default)]
pub struct ExpensesState {
    pub items: Vec<Expense>,
    pub categories: Vec<String>,
    pub filter: ExpenseFilter,
    pub view: ViewPreference,
    pub budget: Option<f64>,
    pub summary: Option<ExpenseSummary>,
    pub loading: bool,
    pub error: Option<String>,
}

impl ExpensesState {
    pub fn stats(&self) -> ExpenseStats {
        ExpenseStats::of(&self.items)
    }

    /// Budget position against the currently listed spending.
    pub fn budget_status(&self) -> Option<BudgetStatus> {
        self.budget.map(|b| BudgetStatus::new(b, self.stats().total))
    }

    pub fn find(&self, id: i64) -> Option<&Expense> {
        self.items.iter().find(|e| e.id == id)
    }

    /// Insert or replace `expense`, keeping newest dates first.
    pub fn upsert(&mut self, expense: Expense) {
        match self.items.iter_mut().find(|e| e.id == expense.id) {
            Some(slot) => *slot = expense,
            None => self.items.push(expense),
        }
        self.items.sort_by(|a, b| b.expense_date.cmp(&a.expense_date).then(b.id.cmp(&a.id)));
    }

    pub fn remove(&mut self, id: i64) {
        self.items.retain(|e| e.id != id);
    }
}
