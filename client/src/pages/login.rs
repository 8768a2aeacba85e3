//! Login page: email + password, or Google sign-in when configured.
//!
//! SYSTEM CONTEXT
//! ==============
//! Google sign-in leaves the app and returns here with the access token in
//! the URL fragment; the page consumes it once on setup and exchanges it with
//! the backend. Successful logins land on the dashboard.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use session::forms::LoginForm;
use session::gateway::AuthRequest;
use session::guard::{DASHBOARD_PATH, LOGIN_PATH, REGISTER_PATH};

use crate::config::ClientConfig;
use crate::util::auth::{AuthActions, GoogleFlow};
use crate::util::google;

/// Input type for a password field with a visibility toggle.
#[must_use]
pub fn password_input_type(visible: bool) -> &'static str {
    if visible { "text" } else { "password" }
}

/// Label for the visibility toggle next to a password field.
#[must_use]
pub fn visibility_toggle_label(visible: bool) -> &'static str {
    if visible { "Hide" } else { "Show" }
}

/// Submit button label while idle or awaiting the backend.
#[must_use]
pub fn submit_label(busy: bool, idle: &'static str, pending: &'static str) -> &'static str {
    if busy { pending } else { idle }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let actions = AuthActions::from_context();
    let navigate = use_navigate();
    let config = ClientConfig::current();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let show_password = RwSignal::new(false);
    let busy = RwSignal::new(false);
    let google_busy = RwSignal::new(false);

    {
        let navigate = navigate.clone();
        actions.complete_google_sign_in(GoogleFlow::SignIn, google_busy, move || {
            navigate(DASHBOARD_PATH, NavigateOptions::default());
        });
    }

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        busy.set(true);
        let form = LoginForm { email: email.get_untracked(), password: password.get_untracked() };
        let navigate = navigate.clone();
        actions.run(AuthRequest::Login(form), move |ok| {
            busy.set(false);
            if ok {
                navigate(DASHBOARD_PATH, NavigateOptions::default());
            }
        });
    };

    let google_client_id = config.google_client_id.clone();
    let on_google = move |_| {
        if let Some(client_id) = google_client_id.as_deref() {
            google_busy.set(true);
            google::begin_sign_in(client_id, LOGIN_PATH);
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Welcome back"</h1>
                <p class="auth-card__subtitle">"Sign in to continue to Edwardo"</p>
                <form class="auth-form" on:submit=on_submit>
                    <label class="auth-label" for="login-email">"Email"</label>
                    <input
                        id="login-email"
                        class="auth-input"
                        type="email"
                        autocomplete="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <label class="auth-label" for="login-password">"Password"</label>
                    <div class="auth-password">
                        <input
                            id="login-password"
                            class="auth-input"
                            type=move || password_input_type(show_password.get())
                            autocomplete="current-password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                        <button
                            class="auth-password__toggle"
                            type="button"
                            on:click=move |_| show_password.update(|v| *v = !*v)
                        >
                            {move || visibility_toggle_label(show_password.get())}
                        </button>
                    </div>
                    <button class="btn btn--primary auth-submit" type="submit" disabled=move || busy.get()>
                        {move || submit_label(busy.get(), "Sign In", "Signing in...")}
                    </button>
                </form>
                <Show when=move || config.google_enabled()>
                    <div class="auth-divider">"or"</div>
                    <button
                        class="btn btn--google"
                        type="button"
                        disabled=move || google_busy.get()
                        on:click=on_google.clone()
                    >
                        {move || submit_label(google_busy.get(), "Continue with Google", "Connecting...")}
                    </button>
                </Show>
                <p class="auth-card__footer">
                    "New here? "
                    <a href=REGISTER_PATH>"Create an account"</a>
                </p>
            </div>
        </div>
    }
}
