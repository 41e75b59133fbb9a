//! Modal with the backend's all-time expense summary.

#[cfg(test)]
#[path = "summary_modal_test.rs"]
mod summary_modal_test;

use std::collections::BTreeMap;

use leptos::prelude::*;
use session::types::ExpenseSummary;

use crate::util::format::format_amount;

/// Breakdown rows, largest first, ties by name.
pub fn sorted_totals(totals: &BTreeMap<String, f64>) -> Vec<(String, f64)> {
    let mut rows: Vec<(String, f64)> = totals.iter().map(|(k, v)| (k.clone(), *v)).collect();
    rows.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    rows
}

#[component]
pub fn SummaryModal(summary: ExpenseSummary, on_close: Callback<()>) -> impl IntoView {
    let categories = sorted_totals(&summary.category_totals);
    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Escape" {
            ev.prevent_default();
            // The page-level Escape would also cancel an edit underneath.
            ev.stop_propagation();
            on_close.run(());
        }
    };

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
            <div
                class="dialog dialog--summary"
                on:click=move |ev| ev.stop_propagation()
                on:keydown=on_keydown
                tabindex="0"
            >
                <h2>"Expense Summary"</h2>
                <dl class="summary-grid">
                    <dt>"Total"</dt>
                    <dd>{format_amount(summary.total_amount)}</dd>
                    <dt>"Cash"</dt>
                    <dd>{format_amount(summary.total_cash_amount)}</dd>
                    <dt>"UPI"</dt>
                    <dd>{format_amount(summary.total_upi_amount)}</dd>
                    <dt>"Transactions"</dt>
                    <dd>{summary.total_transactions}</dd>
                </dl>
                <h3>"By Category"</h3>
                <ul class="summary-breakdown">
                    {categories
                        .into_iter()
                        .map(|(name, total)| {
                            view! {
                                <li>
                                    <span>{name}</span>
                                    <span>{format_amount(total)}</span>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
                <div class="dialog__actions">
                    <button class="btn btn--primary" on:click=move |_| on_close.run(())>"Close"</button>
                </div>
            </div>
        </div>
    }
}
