//! Expense filter controls.

#[cfg(test)]
#[path = "filter_bar_test.rs"]
mod filter_bar_test;

use leptos::prelude::*;
use session::types::{ExpenseFilter, PaymentMethod};

use crate::util::format::non_blank;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterFields {
    pub category: String,
    pub payment_method: String,
    pub start_date: String,
    pub end_date: String,
    pub upi_vpa: String,
    pub transaction_id: String,
}

/// Raw control values to a filter. An unknown payment method means "any".
pub fn build_filter(fields: &FilterFields) -> ExpenseFilter {
    ExpenseFilter {
        category: non_blank(&fields.category),
        payment_method: PaymentMethod::parse(&fields.payment_method),
        start_date: non_blank(&fields.start_date),
        end_date: non_blank(&fields.end_date),
        upi_vpa: non_blank(&fields.upi_vpa),
        transaction_id: non_blank(&fields.transaction_id),
    }
}

/// Whether the date range is inverted (`start` after `end`).
pub fn range_inverted(filter: &ExpenseFilter) -> bool {
    match (&filter.start_date, &filter.end_date) {
        (Some(start), Some(end)) => start > end,
        _ => false,
    }
}

#[component]
pub fn FilterBar(
    #[prop(into)] categories: Signal<Vec<String>>,
    on_apply: Callback<ExpenseFilter>,
    on_export: Callback<ExpenseFilter>,
) -> impl IntoView {
    let fields = RwSignal::new(FilterFields::default());
    let error = RwSignal::new(None::<&'static str>);

    let apply = move || {
        let filter = build_filter(&fields.get_untracked());
        if range_inverted(&filter) {
            error.set(Some("Start date must be before end date"));
            return None;
        }
        error.set(None);
        Some(filter)
    };
    let on_apply_click = move |_| {
        if let Some(filter) = apply() {
            on_apply.run(filter);
        }
    };
    let on_clear_click = move |_| {
        fields.set(FilterFields::default());
        error.set(None);
        on_apply.run(ExpenseFilter::default());
    };
    let on_export_click = move |_| {
        if let Some(filter) = apply() {
            on_export.run(filter);
        }
    };

    view! {
        <section class="filter-bar">
            <select
                prop:value=move || fields.with(|f| f.category.clone())
                on:change=move |ev| fields.update(|f| f.category = event_target_value(&ev))
            >
                <option value="">"All categories"</option>
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
            </select>
            <select
                prop:value=move || fields.with(|f| f.payment_method.clone())
                on:change=move |ev| fields.update(|f| f.payment_method = event_target_value(&ev))
            >
                <option value="">"All methods"</option>
                <option value="CASH">"Cash"</option>
                <option value="UPI">"UPI"</option>
            </select>
            <input
                type="date"
                prop:value=move || fields.with(|f| f.start_date.clone())
                on:input=move |ev| fields.update(|f| f.start_date = event_target_value(&ev))
            />
            <input
                type="date"
                prop:value=move || fields.with(|f| f.end_date.clone())
                on:input=move |ev| fields.update(|f| f.end_date = event_target_value(&ev))
            />
            <input
                type="text"
                placeholder="UPI ID"
                prop:value=move || fields.with(|f| f.upi_vpa.clone())
                on:input=move |ev| fields.update(|f| f.upi_vpa = event_target_value(&ev))
            />
            <input
                type="text"
                placeholder="Transaction ID"
                prop:value=move || fields.with(|f| f.transaction_id.clone())
                on:input=move |ev| fields.update(|f| f.transaction_id = event_target_value(&ev))
            />
            <button class="btn btn--primary" on:click=on_apply_click>"Apply Filters"</button>
            <button class="btn" on:click=on_clear_click>"Clear"</button>
            <button class="btn" on:click=on_export_click>"Export CSV"</button>
            <Show when=move || error.get().is_some()>
                <p class="filter-bar__error">{move || error.get().unwrap_or_default()}</p>
            </Show>
        </section>
    }
}
