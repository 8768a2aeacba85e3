//! Top navigation bar.
//!
//! SYSTEM CONTEXT
//! ==============
//! Shows the dashboard link and logout for authenticated sessions, and the
//! login/register links otherwise. Logging out lets the protected guard move
//! the user off the dashboard.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use session::gateway::AuthRequest;
use session::guard::{DASHBOARD_PATH, LANDING_PATH, LOGIN_PATH, REGISTER_PATH};

use crate::util::auth::AuthActions;

#[component]
pub fn Navbar() -> impl IntoView {
    let actions = AuthActions::from_context();
    let auth = actions.auth;
    let navigate = use_navigate();
    let busy = RwSignal::new(false);

    let signed_in = move || auth.with(|s| s.is_authenticated());
    let display_name = move || {
        auth.with(|s| {
            s.session()
                .and_then(|session| session.profile())
                .and_then(|p| p.display_name().map(str::to_owned))
        })
    };

    let go = {
        let navigate = navigate.clone();
        move |path: &'static str| navigate(path, NavigateOptions::default())
    };
    let go_dashboard = go.clone();
    let go_login = go.clone();
    let go_register = go;

    let on_logout = move |_| {
        if busy.get_untracked() {
            return;
        }
        busy.set(true);
        let navigate = navigate.clone();
        actions.run(AuthRequest::Logout, move |ok| {
            busy.set(false);
            if ok {
                navigate(LANDING_PATH, NavigateOptions::default());
            }
        });
    };

    view! {
        <header class="navbar">
            <a href=LANDING_PATH class="navbar__brand">"Edwardo"</a>
            <span class="navbar__spacer"></span>
            <Show
                when=signed_in
                fallback=move || {
                    let go_login = go_login.clone();
                    let go_register = go_register.clone();
                    view! {
                        <button class="btn btn--ghost" on:click=move |_| go_login(LOGIN_PATH)>"Login"</button>
                        <button class="btn btn--primary" on:click=move |_| go_register(REGISTER_PATH)>"Get Started"</button>
                    }
                }
            >
                {
                    let go_dashboard = go_dashboard.clone();
                    let on_logout = on_logout.clone();
                    view! {
                        <span class="navbar__user">{display_name}</span>
                        <button class="btn btn--ghost" on:click=move |_| go_dashboard(DASHBOARD_PATH)>"Dashboard"</button>
                        <button class="btn btn--primary" on:click=on_logout disabled=move || busy.get()>"Logout"</button>
                    }
                }
            </Show>
        </header>
    }
}
