//! Monthly budget panel with inline editor.

#[cfg(test)]
#[path = "budget_panel_test.rs"]
mod budget_panel_test;

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;
use session::{BudgetLevel, BudgetStatus, parse_budget_input};

use crate::util::format::format_amount;

pub fn level_class(level: BudgetLevel) -> &'static str {
    match level {
        BudgetLevel::Healthy => "budget--healthy",
        BudgetLevel::Warning => "budget--warning",
        BudgetLevel::Over => "budget--over",
    }
}

/// One-line summary under the progress bar.
pub fn budget_message(status: &BudgetStatus) -> String {
    if status.is_over() {
        format!("Over budget by {}", format_amount(-status.remaining))
    } else {
        format!(
            "{} left of {} ({:.0}% used)",
            format_amount(status.remaining),
            format_amount(status.budget),
            status.percent_used
        )
    }
}

#[component]
pub fn BudgetPanel(
    #[prop(into)] status: Signal<Option<BudgetStatus>>,
    on_save: Callback<f64>,
    on_clear: Callback<()>,
) -> impl IntoView {
    let editing = RwSignal::new(false);
    let input = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);

    let open_editor = move |_| {
        let current = status.get_untracked().map(|s| s.budget.to_string()).unwrap_or_default();
        input.set(current);
        error.set(None);
        editing.set(true);
    };
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        match parse_budget_input(&input.get_untracked()) {
            Ok(budget) => {
                editing.set(false);
                on_save.run(budget);
            }
            Err(e) => error.set(Some(e.to_string())),
        }
    };

    view! {
        <section class="budget-panel">
            <h3>"Monthly Budget"</h3>
            {move || match status.get() {
                Some(s) => {
                    let width = format!("width: {:.1}%", s.bar_percent());
                    view! {
                        <div class=format!("budget-panel__bar {}", level_class(s.level()))>
                            <div class="budget-panel__fill" style=width></div>
                        </div>
                        <p class="budget-panel__message">{budget_message(&s)}</p>
                    }
                        .into_any()
                }
                None => view! { <p class="budget-panel__message">"No budget set"</p> }.into_any(),
            }}
            <Show
                when=move || editing.get()
                fallback=move || {
                    view! {
                        <div class="budget-panel__actions">
                            <button class="btn" on:click=open_editor>"Set Budget"</button>
                            <Show when=move || status.get().is_some()>
                                <button class="btn" on:click=move |_| on_clear.run(())>"Clear"</button>
                            </Show>
                        </div>
                    }
                }
            >
                <form class="budget-panel__editor" on:submit=on_submit>
                    <input
                        type="number"
                        step="0.01"
                        min="0"
                        prop:value=move || input.get()
                        on:input=move |ev| input.set(event_target_value(&ev))
                    />
                    <button class="btn btn--primary" type="submit">"Save"</button>
                    <button class="btn" type="button" on:click=move |_| editing.set(false)>"Cancel"</button>
                </form>
                <Show when=move || error.get().is_some()>
                    <p class="budget-panel__error">{move || error.get().unwrap_or_default()}</p>
                </Show>
            </Show>
        </section>
    }
}
