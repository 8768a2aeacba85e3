//! Route guards: protected-area gate and root-index redirect.
//!
//! SYSTEM CONTEXT
//! ==============
//! Decisions come from `session::guard`; these components only feed them the
//! current path and session, navigate on a redirect, and render accordingly.
//! While rehydration is pending both show the neutral loading view.

use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};
use session::guard::GuardOutcome;

use crate::components::loading::LoadingView;
use crate::state::auth::AuthState;
use crate::util::auth::install_guard_redirect;

/// Renders `children` for authenticated sessions; anonymous visitors are
/// sent to the landing page.
#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let pathname = use_location().pathname;
    let outcome = move || auth.with(|s| s.protected_outcome(&pathname.get()));
    install_guard_redirect(outcome, use_navigate());

    move || match outcome() {
        Some(GuardOutcome::Render) => children().into_any(),
        None => view! { <LoadingView/> }.into_any(),
        Some(GuardOutcome::Redirect(_) | GuardOutcome::Nothing) => ().into_any(),
    }
}

/// Root index: authenticated sessions go to the dashboard, everyone else to
/// the landing page.
#[component]
pub fn RedirectRoute() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let pathname = use_location().pathname;
    let outcome = move || auth.with(|s| s.redirect_outcome(&pathname.get()));
    install_guard_redirect(outcome, use_navigate());

    move || match outcome() {
        None => view! { <LoadingView/> }.into_any(),
        Some(_) => ().into_any(),
    }
}
