//! Expense list in card or table layout, with running totals.

#[cfg(test)]
#[path = "expense_list_test.rs"]
mod expense_list_test;

use leptos::prelude::*;
use session::ViewPreference;
use session::types::{Expense, ExpenseStats, PaymentMethod};

use crate::util::format::{format_amount, format_date, payment_label};

/// Secondary line under an expense: UPI reference or notes.
pub fn expense_detail(expense: &Expense) -> Option<String> {
    if expense.payment_method == PaymentMethod::Upi {
        let parts: Vec<&str> = [expense.upi_vpa.as_deref(), expense.transaction_id.as_deref()]
            .into_iter()
            .flatten()
            .filter(|p| !p.is_empty())
            .collect();
        if !parts.is_empty() {
            return Some(parts.join(" · "));
        }
    }
    expense.notes.clone().filter(|n| !n.trim().is_empty())
}

pub fn stats_line(stats: &ExpenseStats) -> String {
    let noun = if stats.count == 1 { "expense" } else { "expenses" };
    format!(
        "{} {noun} · {} total · {} cash · {} UPI",
        stats.count,
        format_amount(stats.total),
        format_amount(stats.cash_total),
        format_amount(stats.upi_total)
    )
}

#[component]
pub fn ExpenseList(
    #[prop(into)] expenses: Signal<Vec<Expense>>,
    #[prop(into)] view: Signal<ViewPreference>,
    #[prop(into)] loading: Signal<bool>,
    on_edit: Callback<i64>,
    on_delete: Callback<i64>,
) -> impl IntoView {
    let stats = move || stats_line(&ExpenseStats::of(&expenses.get()));

    view! {
        <section class="expense-list">
            <p class="expense-list__stats">{stats}</p>
            <Show
                when=move || !loading.get()
                fallback=move || view! { <p class="expense-list__empty">"Loading expenses..."</p> }
            >
                <Show
                    when=move || !expenses.get().is_empty()
                    fallback=move || view! { <p class="expense-list__empty">"No expenses found"</p> }
                >
                    <Show
                        when=move || view.get() == ViewPreference::Table
                        fallback=move || view! { <ExpenseCards expenses on_edit on_delete/> }
                    >
                        <ExpenseTable expenses on_edit on_delete/>
                    </Show>
                </Show>
            </Show>
        </section>
    }
}

#[component]
fn ExpenseCards(expenses: Signal<Vec<Expense>>, on_edit: Callback<i64>, on_delete: Callback<i64>) -> impl IntoView {
    view! {
        <div class="expense-cards">
            <For
                each=move || expenses.get()
                key=|e| (e.id, e.updated_at.clone())
                children=move |expense: Expense| {
                    let id = expense.id;
                    let detail = expense_detail(&expense);
                    view! {
                        <article class="expense-card">
                            <header class="expense-card__header">
                                <span class="expense-card__category">{expense.category.clone()}</span>
                                <span class="expense-card__amount">{format_amount(expense.amount)}</span>
                            </header>
                            <p class="expense-card__meta">
                                {format_date(&expense.expense_date)}
                                " · "
                                {payment_label(expense.payment_method)}
                            </p>
                            {detail.map(|d| view! { <p class="expense-card__detail">{d}</p> })}
                            <div class="expense-card__actions">
                                <button class="btn" on:click=move |_| on_edit.run(id)>"Edit"</button>
                                <button class="btn btn--danger" on:click=move |_| on_delete.run(id)>"Delete"</button>
                            </div>
                        </article>
                    }
                }
            />
        </div>
    }
}

#[component]
fn ExpenseTable(expenses: Signal<Vec<Expense>>, on_edit: Callback<i64>, on_delete: Callback<i64>) -> impl IntoView {
    view! {
        <table class="expense-table">
            <thead>
                <tr>
                    <th>"Date"</th>
                    <th>"Category"</th>
                    <th>"Amount"</th>
                    <th>"Method"</th>
                    <th>"Details"</th>
                    <th></th>
                </tr>
            </thead>
            <tbody>
                <For
                    each=move || expenses.get()
                    key=|e| (e.id, e.updated_at.clone())
                    children=move |expense: Expense| {
                        let id = expense.id;
                        let detail = expense_detail(&expense).unwrap_or_default();
                        view! {
                            <tr>
                                <td>{format_date(&expense.expense_date)}</td>
                                <td>{expense.category.clone()}</td>
                                <td class="expense-table__amount">{format_amount(expense.amount)}</td>
                                <td>{payment_label(expense.payment_method)}</td>
                                <td>{detail}</td>
                                <td class="expense-table__actions">
                                    <button class="btn" on:click=move |_| on_edit.run(id)>"Edit"</button>
                                    <button class="btn btn--danger" on:click=move |_| on_delete.run(id)>"Delete"</button>
                                </td>
                            </tr>
                        }
                    }
                />
            </tbody>
        </table>
    }
}
