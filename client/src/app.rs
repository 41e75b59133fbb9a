//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::toast_stack::ToastStack;
use crate::pages::{dashboard::DashboardPage, login::LoginPage};
use crate::state::session::{provide_session, use_session};
use crate::state::toast::ToastState;
use crate::state::ui::UiState;
use crate::util::dark_mode;

/// Root application component.
///
/// Provides the toast stack, UI chrome state and the per-page session, then
/// routes between the login and dashboard pages.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let toasts = RwSignal::new(ToastState::default());
    let ui = RwSignal::new(UiState::default());
    provide_context(toasts);
    provide_context(ui);
    provide_session(toasts);

    let theme = use_session().with_value(|s| dark_mode::read_preference(&s.prefs));
    dark_mode::apply(theme);
    ui.update(|u| u.theme = theme);

    view! {
        <Title text="Expense Tracker"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("login.html") view=LoginPage/>
                <Route path=StaticSegment("dashboard") view=DashboardPage/>
                <Route path=StaticSegment("") view=DashboardPage/>
            </Routes>
        </Router>
        <ToastStack/>
    }
}
