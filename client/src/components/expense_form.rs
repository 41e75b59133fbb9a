//! Add/edit expense form.
//!
//! DESIGN
//! ======
//! Field values are kept as raw strings in [`DraftFields`] and only turned
//! into an `ExpenseDraft` on submit, so half-typed amounts never fight the
//! input element.

#[cfg(test)]
#[path = "expense_form_test.rs"]
mod expense_form_test;

use leptos::prelude::*;
use session::types::{Expense, ExpenseDraft, PaymentMethod};

use crate::util::format::{non_blank, parse_amount};

/// DOM id of the amount input, the target of the new-expense shortcut.
pub const AMOUNT_INPUT_ID: &str = "expense-amount";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DraftFields {
    pub amount: String,
    pub category: String,
    pub expense_date: String,
    pub payment_method: String,
    pub upi_vpa: String,
    pub transaction_id: String,
    pub payer_name: String,
    pub notes: String,
}

impl DraftFields {
    pub fn from_expense(e: &Expense) -> Self {
        Self {
            amount: e.amount.to_string(),
            category: e.category.clone(),
            expense_date: e.expense_date.clone(),
            payment_method: e.payment_method.as_str().to_owned(),
            upi_vpa: e.upi_vpa.clone().unwrap_or_default(),
            transaction_id: e.transaction_id.clone().unwrap_or_default(),
            payer_name: e.payer_name.clone().unwrap_or_default(),
            notes: e.notes.clone().unwrap_or_default(),
        }
    }

    /// Blank form for a new expense dated `today`.
    pub fn blank(today: &str) -> Self {
        Self {
            expense_date: today.get(..10).unwrap_or(today).to_owned(),
            payment_method: PaymentMethod::Cash.as_str().to_owned(),
            ..Self::default()
        }
    }

    pub fn is_upi(&self) -> bool {
        PaymentMethod::parse(&self.payment_method) == Some(PaymentMethod::Upi)
    }
}

/// Validate the raw fields. UPI details are only kept for UPI payments.
///
/// # Errors
///
/// Returns the message shown under the form.
pub fn build_draft(fields: &DraftFields) -> Result<ExpenseDraft, &'static str> {
    let amount = parse_amount(&fields.amount)
        .filter(|a| *a > 0.0)
        .ok_or("Please enter a valid amount")?;
    let category = non_blank(&fields.category).ok_or("Please select a category")?;
    let expense_date = non_blank(&fields.expense_date).ok_or("Please select a date")?;
    let payment_method = PaymentMethod::parse(&fields.payment_method).ok_or("Please select a payment method")?;

    let upi = payment_method == PaymentMethod::Upi;
    let upi_only = |raw: &str| if upi { non_blank(raw) } else { None };
    Ok(ExpenseDraft {
        amount,
        category,
        expense_date,
        payment_method,
        upi_vpa: upi_only(&fields.upi_vpa),
        transaction_id: upi_only(&fields.transaction_id),
        payer_name: upi_only(&fields.payer_name),
        notes: non_blank(&fields.notes),
    })
}

#[component]
pub fn ExpenseForm(
    #[prop(into)] categories: Signal<Vec<String>>,
    /// Expense being edited; `None` for a new one.
    #[prop(into)]
    editing: Signal<Option<Expense>>,
    /// Bumped by the page after a successful save to clear the form.
    #[prop(into)]
    reset: Signal<u64>,
    on_save: Callback<ExpenseDraft>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let fields = RwSignal::new(DraftFields::blank(&crate::util::download::today_iso()));
    let error = RwSignal::new(None::<&'static str>);

    Effect::new(move || {
        reset.track();
        let next = match editing.get() {
            Some(expense) => DraftFields::from_expense(&expense),
            None => DraftFields::blank(&crate::util::download::today_iso()),
        };
        fields.set(next);
        error.set(None);
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        match build_draft(&fields.get_untracked()) {
            Ok(draft) => {
                error.set(None);
                on_save.run(draft);
            }
            Err(message) => error.set(Some(message)),
        }
    };

    view! {
        <form class="expense-form" on:submit=on_submit>
            <h2>{move || if editing.get().is_some() { "Edit Expense" } else { "Add Expense" }}</h2>
            <label>
                "Amount"
                <input id=AMOUNT_INPUT_ID type="number" step="0.01" min="0" prop:value=move || fields.with(|f| f.amount.clone())
                    on:input=move |ev| fields.update(|f| f.amount = event_target_value(&ev))/>
            </label>
            <label>
                "Category"
                <input type="text" list="expense-categories" prop:value=move || fields.with(|f| f.category.clone())
                    on:input=move |ev| fields.update(|f| f.category = event_target_value(&ev))/>
                <datalist id="expense-categories">
                    {move || {
                        categories
                            .get()
                            .into_iter()
                            .map(|c| {
                                let label = c.clone();
                                view! { <option value=c>{label}</option> }
                            })
                            .collect_view()
                    }}
                </datalist>
            </label>
            <label>
                "Date"
                <input type="date" prop:value=move || fields.with(|f| f.expense_date.clone())
                    on:input=move |ev| fields.update(|f| f.expense_date = event_target_value(&ev))/>
            </label>
            <label>
                "Payment Method"
                <select prop:value=move || fields.with(|f| f.payment_method.clone())
                    on:change=move |ev| fields.update(|f| f.payment_method = event_target_value(&ev))>
                    <option value="CASH">"Cash"</option>
                    <option value="UPI">"UPI"</option>
                </select>
            </label>
            <Show when=move || fields.get().is_upi()>
                <label>
                    "UPI ID"
                    <input type="text" prop:value=move || fields.with(|f| f.upi_vpa.clone())
                        on:input=move |ev| fields.update(|f| f.upi_vpa = event_target_value(&ev))/>
                </label>
                <label>
                    "Transaction ID"
                    <input type="text" prop:value=move || fields.with(|f| f.transaction_id.clone())
                        on:input=move |ev| fields.update(|f| f.transaction_id = event_target_value(&ev))/>
                </label>
                <label>
                    "Payer Name"
                    <input type="text" prop:value=move || fields.with(|f| f.payer_name.clone())
                        on:input=move |ev| fields.update(|f| f.payer_name = event_target_value(&ev))/>
                </label>
            </Show>
            <label>
                "Notes"
                <textarea prop:value=move || fields.with(|f| f.notes.clone())
                    on:input=move |ev| fields.update(|f| f.notes = event_target_value(&ev))></textarea>
            </label>
            <Show when=move || error.get().is_some()>
                <p class="expense-form__error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <div class="expense-form__actions">
                <button class="btn btn--primary" type="submit">
                    {move || if editing.get().is_some() { "Update Expense" } else { "Add Expense" }}
                </button>
                <Show when=move || editing.get().is_some()>
                    <button class="btn" type="button" on:click=move |_| on_cancel.run(())>
                        "Cancel"
                    </button>
                </Show>
            </div>
        </form>
    }
}
