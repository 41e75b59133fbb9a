//! Dashboard page: expense list, editor, filters, budget and export.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the authenticated landing route. On mount the session guard
//! validates the stored token (bounded) and either replaces the page with the
//! login page or runs [`DashboardData`]'s loads one after another. Every
//! later action here assumes the session is valid; a rejected call only
//! surfaces as a toast.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use std::rc::Rc;

use async_trait::async_trait;
use leptos::prelude::*;
use session::types::{ExpenseDraft, ExpenseFilter};
use session::{ApiError, DashboardLoader, ExpenseApi, NoticeLevel, Notifier, Preferences, SessionError};
use session::{ViewPreference, guard::MSG_NETWORK_ERROR};
#[cfg(feature = "csr")]
use session::GuardState;

use crate::components::budget_panel::BudgetPanel;
use crate::components::expense_form::{AMOUNT_INPUT_ID, ExpenseForm};
use crate::components::expense_list::ExpenseList;
use crate::components::filter_bar::FilterBar;
use crate::components::summary_modal::SummaryModal;
use crate::net::api::HttpApi;
use crate::state::expenses::ExpensesState;
use crate::state::session::{SessionHandle, use_session};
use crate::state::toast::{ToastNotifier, ToastState};
use crate::state::ui::UiState;
use crate::util::dark_mode;
use crate::util::download::{export_filename, save_text, today_iso};
use crate::util::shortcuts;
#[cfg(feature = "csr")]
use crate::util::shortcuts::{Shortcut, shortcut_for};

pub const MSG_EXPENSE_ADDED: &str = "Expense added successfully";
pub const MSG_EXPENSE_UPDATED: &str = "Expense updated successfully";
pub const MSG_EXPENSE_DELETED: &str = "Expense deleted successfully";
pub const MSG_DELETE_CONFIRM: &str = "Are you sure you want to delete this expense?";
pub const MSG_EXPORTED: &str = "Expenses exported successfully";
pub const MSG_BUDGET_SAVED: &str = "Budget updated";
pub const MSG_BUDGET_CLEARED: &str = "Budget cleared";

pub const ACTION_RELOAD: &str = "load expenses";
pub const ACTION_OPEN_EDIT: &str = "load expense";

/// Toast text for a failed user action.
pub fn action_failed_message(action: &str, err: &ApiError) -> String {
    match err {
        ApiError::Network(_) => MSG_NETWORK_ERROR.to_owned(),
        other => match other.server_message() {
            Some(message) => format!("Failed to {action}: {message}"),
            None => format!("Failed to {action}"),
        },
    }
}

/// Header greeting for the signed-in user.
pub fn greeting(username: Option<&str>) -> String {
    match username {
        Some(name) if !name.trim().is_empty() => format!("Welcome, {}", name.trim()),
        _ => "Welcome".to_owned(),
    }
}

/// Refetch the list under the current filter.
///
/// # Errors
///
/// The list request failed; the previous items stay on screen.
pub async fn reload_expenses(api: &dyn ExpenseApi, expenses: RwSignal<ExpensesState>) -> Result<(), ApiError> {
    let filter = expenses.with_untracked(|s| s.filter.clone());
    expenses.update(|s| s.loading = true);
    let result = api.list_expenses(&filter).await;
    expenses.update(|s| {
        s.loading = false;
        match &result {
            Ok(items) => {
                s.items.clone_from(items);
                s.error = None;
            }
            Err(e) => s.error = Some(e.to_string()),
        }
    });
    result.map(|_| ())
}

/// The dashboard's post-authentication steps, writing into page signals.
pub struct DashboardData {
    api: Rc<HttpApi>,
    prefs: Preferences,
    expenses: RwSignal<ExpensesState>,
    ui: RwSignal<UiState>,
    ready: RwSignal<bool>,
}

impl DashboardData {
    pub fn new(session: SessionHandle, expenses: RwSignal<ExpensesState>, ui: RwSignal<UiState>, ready: RwSignal<bool>) -> Self {
        let (api, prefs) = session.with_value(|s| (Rc::clone(&s.api), s.prefs.clone()));
        Self { api, prefs, expenses, ui, ready }
    }
}

#[async_trait(?Send)]
impl DashboardLoader for DashboardData {
    fn prepare(&self) -> Result<(), SessionError> {
        #[cfg(feature = "csr")]
        {
            if web_sys::window().and_then(|w| w.document()).is_none() {
                return Err(SessionError::Initialization("no document".to_owned()));
            }
        }
        self.ui.update(UiState::close_dialogs);
        self.ready.set(true);
        Ok(())
    }

    async fn load_categories(&self) -> Result<(), ApiError> {
        let categories = self.api.categories().await?;
        self.expenses.update(|s| s.categories = categories);
        Ok(())
    }

    async fn load_budget(&self) -> Result<(), ApiError> {
        let budget = self.prefs.budget();
        self.expenses.update(|s| s.budget = budget);
        Ok(())
    }

    fn apply_view_preference(&self) {
        let view = self.prefs.view();
        self.expenses.update(|s| s.view = view);
    }

    async fn load_expenses(&self) -> Result<(), ApiError> {
        reload_expenses(self.api.as_ref(), self.expenses).await
    }
}

/// Dashboard page. Renders a placeholder until the session is confirmed.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = use_session();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let expenses = RwSignal::new(ExpensesState::default());
    let ready = RwSignal::new(false);
    let form_reset = RwSignal::new(0_u64);
    let notifier = ToastNotifier::new(toasts);

    let loader = DashboardData::new(session, expenses, ui, ready);
    #[cfg(feature = "csr")]
    {
        let guard = session.with_value(|s| s.guard.clone());
        leptos::task::spawn_local(async move {
            let state = guard.initialize_dashboard(&loader).await;
            if state != GuardState::Authenticated {
                ready.set(false);
            }
        });
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = loader;
    }

    let api = move || session.with_value(|s| Rc::clone(&s.api));
    let prefs = move || session.with_value(|s| s.prefs.clone());
    let username = move || session.with_value(|s| s.guard.store().username());

    let on_save = Callback::new(move |draft: ExpenseDraft| {
        let editing = ui.with_untracked(|u| u.editing);
        let api = api();
        run_action(async move {
            let saved = match editing {
                Some(id) => api.update_expense(id, &draft).await,
                None => api.create_expense(&draft).await,
            };
            match saved {
                Ok(_) => {
                    notifier.notify(NoticeLevel::Success, if editing.is_some() { MSG_EXPENSE_UPDATED } else { MSG_EXPENSE_ADDED });
                    ui.update(|u| u.editing = None);
                    form_reset.update(|n| *n += 1);
                    if let Err(e) = reload_expenses(api.as_ref(), expenses).await {
                        notifier.notify(NoticeLevel::Error, &action_failed_message(ACTION_RELOAD, &e));
                    }
                }
                Err(e) => notifier.notify(NoticeLevel::Error, &action_failed_message("save expense", &e)),
            }
        });
    });

    let on_cancel_edit = Callback::new(move |()| ui.update(|u| u.editing = None));
    // The list row may be stale; edit what the backend holds now.
    let on_edit = Callback::new(move |id: i64| {
        let api = api();
        run_action(async move {
            match api.get_expense(id).await {
                Ok(expense) => {
                    expenses.update(|s| s.upsert(expense));
                    ui.update(|u| u.editing = Some(id));
                    shortcuts::focus(AMOUNT_INPUT_ID);
                }
                Err(e) => notifier.notify(NoticeLevel::Error, &action_failed_message(ACTION_OPEN_EDIT, &e)),
            }
        });
    });

    let on_delete = Callback::new(move |id: i64| {
        if !notifier.confirm(MSG_DELETE_CONFIRM) {
            return;
        }
        let api = api();
        run_action(async move {
            match api.delete_expense(id).await {
                Ok(()) => {
                    expenses.update(|s| s.remove(id));
                    if ui.with_untracked(|u| u.editing == Some(id)) {
                        ui.update(|u| u.editing = None);
                    }
                    notifier.notify(NoticeLevel::Success, MSG_EXPENSE_DELETED);
                }
                Err(e) => notifier.notify(NoticeLevel::Error, &action_failed_message("delete expense", &e)),
            }
        });
    });

    let on_filter = Callback::new(move |filter: ExpenseFilter| {
        expenses.update(|s| s.filter = filter);
        let api = api();
        run_action(async move {
            if let Err(e) = reload_expenses(api.as_ref(), expenses).await {
                notifier.notify(NoticeLevel::Error, &action_failed_message(ACTION_RELOAD, &e));
            }
        });
    });

    let on_export = Callback::new(move |filter: ExpenseFilter| {
        let api = api();
        run_action(async move {
            let body = match api.export_csv(&filter).await {
                Ok(body) => body,
                Err(e) => {
                    notifier.notify(NoticeLevel::Error, &action_failed_message("export expenses", &e));
                    return;
                }
            };
            match save_text(&export_filename(&today_iso()), "text/csv", &body) {
                Ok(()) => notifier.notify(NoticeLevel::Success, MSG_EXPORTED),
                Err(e) => {
                    leptos::logging::warn!("csv download failed: {e}");
                    notifier.notify(NoticeLevel::Error, "Failed to export expenses");
                }
            }
        });
    });

    let open_summary = move || {
        let api = api();
        run_action(async move {
            match api.summary().await {
                Ok(summary) => {
                    expenses.update(|s| s.summary = Some(summary));
                    ui.update(|u| u.show_summary = true);
                }
                Err(e) => notifier.notify(NoticeLevel::Error, &action_failed_message("load summary", &e)),
            }
        });
    };
    let on_summary_close = Callback::new(move |()| ui.update(|u| u.show_summary = false));

    #[cfg(feature = "csr")]
    {
        let handle = window_event_listener(leptos::ev::keydown, move |ev| {
            let Some(shortcut) = shortcut_for(&ev.key(), ev.ctrl_key(), ev.meta_key()) else {
                return;
            };
            if !ready.get_untracked() {
                return;
            }
            if shortcut.prevents_default() {
                ev.prevent_default();
            }
            match shortcut {
                Shortcut::NewExpense => shortcuts::focus(AMOUNT_INPUT_ID),
                Shortcut::Export => on_export.run(expenses.with_untracked(|s| s.filter.clone())),
                Shortcut::Summary => open_summary(),
                Shortcut::Dismiss => ui.maybe_update(UiState::dismiss),
            }
        });
        on_cleanup(move || handle.remove());
    }

    let on_budget_save = Callback::new(move |budget: f64| {
        prefs().set_budget(budget);
        expenses.update(|s| s.budget = Some(budget));
        notifier.notify(NoticeLevel::Success, MSG_BUDGET_SAVED);
    });
    let on_budget_clear = Callback::new(move |()| {
        prefs().clear_budget();
        expenses.update(|s| s.budget = None);
        notifier.notify(NoticeLevel::Info, MSG_BUDGET_CLEARED);
    });

    let set_view = move |view: ViewPreference| {
        prefs().set_view(view);
        expenses.update(|s| s.view = view);
    };

    let on_theme = move |_| {
        let next = dark_mode::toggle(&prefs(), ui.get_untracked().theme);
        ui.update(|u| u.theme = next);
    };

    let on_logout = move |_| {
        let guard = session.with_value(|s| s.guard.clone());
        guard.logout();
    };

    let editing_expense =
        Signal::derive(move || ui.get().editing.and_then(|id| expenses.with(|s| s.find(id).cloned())));

    view! {
        <Show
            when=move || ready.get()
            fallback=move || {
                view! {
                    <div class="dashboard-page">
                        <p>"Checking your session..."</p>
                    </div>
                }
            }
        >
            <div class="dashboard-page">
                <header class="dashboard-page__header toolbar">
                    <span class="toolbar__title">"Expense Tracker"</span>
                    <span class="toolbar__divider" aria-hidden="true"></span>
                    <span class="toolbar__self">{move || greeting(username().as_deref())}</span>
                    <span class="toolbar__spacer"></span>
                    <button class="btn" on:click=move |_| open_summary() title="Summary (Ctrl+D)">"Summary"</button>
                    <button
                        class="btn"
                        class:btn--active=move || expenses.get().view == ViewPreference::Card
                        on:click=move |_| set_view(ViewPreference::Card)
                    >
                        "Cards"
                    </button>
                    <button
                        class="btn"
                        class:btn--active=move || expenses.get().view == ViewPreference::Table
                        on:click=move |_| set_view(ViewPreference::Table)
                    >
                        "Table"
                    </button>
                    <button class="btn toolbar__dark-toggle" on:click=on_theme title="Toggle dark mode">
                        {move || dark_mode::toggle_glyph(ui.get().theme)}
                    </button>
                    <button class="btn toolbar__logout" on:click=on_logout title="Logout">
                        "Logout"
                    </button>
                </header>

                <div class="dashboard-page__grid">
                    <aside class="dashboard-page__side">
                        <ExpenseForm
                            categories=Signal::derive(move || expenses.get().categories)
                            editing=editing_expense
                            reset=form_reset
                            on_save
                            on_cancel=on_cancel_edit
                        />
                        <BudgetPanel
                            status=Signal::derive(move || expenses.get().budget_status())
                            on_save=on_budget_save
                            on_clear=on_budget_clear
                        />
                    </aside>
                    <main class="dashboard-page__main">
                        <FilterBar
                            categories=Signal::derive(move || expenses.get().categories)
                            on_apply=on_filter
                            on_export
                        />
                        <Show when=move || expenses.get().error.is_some()>
                            <p class="dashboard-page__error">"Error loading expenses"</p>
                        </Show>
                        <ExpenseList
                            expenses=Signal::derive(move || expenses.get().items)
                            view=Signal::derive(move || expenses.get().view)
                            loading=Signal::derive(move || expenses.get().loading)
                            on_edit
                            on_delete
                        />
                    </main>
                </div>
            </div>
        </Show>
        <Show when=move || ui.get().show_summary>
            {move || {
                expenses
                    .get()
                    .summary
                    .map(|summary| view! { <SummaryModal summary on_close=on_summary_close/> })
            }}
        </Show>
    }
}

/// Run a page action on the browser executor; dropped outside the browser.
fn run_action<F>(action: F)
where
    F: std::future::Future<Output = ()> + 'static,
{
    #[cfg(feature = "csr")]
    {
        leptos::task::spawn_local(action);
    }
    #[cfg(not(feature = "csr"))]
    {
        drop(action);
    }
}
