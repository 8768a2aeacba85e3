//! Registration page: name, email, password with confirmation, or Google
//! sign-up when configured.
//!
//! Live hints mirror the checks `RegisterForm::validate` performs on submit;
//! the submit path still validates before anything reaches the backend.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use session::ValidationError;
use session::forms::{MIN_PASSWORD_LEN, RegisterForm};
use session::gateway::AuthRequest;
use session::guard::{DASHBOARD_PATH, LOGIN_PATH, REGISTER_PATH};

use super::login::{password_input_type, submit_label, visibility_toggle_label};
use crate::config::ClientConfig;
use crate::util::auth::{AuthActions, GoogleFlow};
use crate::util::google;

/// Hint under the password field once something has been typed.
#[must_use]
pub fn password_hint(password: &str) -> Option<String> {
    let len = password.chars().count();
    (len > 0 && len < MIN_PASSWORD_LEN)
        .then(|| ValidationError::PasswordTooShort { min: MIN_PASSWORD_LEN }.to_string())
}

/// Hint under the confirmation field once it disagrees with the password.
#[must_use]
pub fn confirmation_hint(password: &str, confirm: &str) -> Option<String> {
    (!confirm.is_empty() && confirm != password).then(|| ValidationError::PasswordMismatch.to_string())
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let actions = AuthActions::from_context();
    let navigate = use_navigate();
    let config = ClientConfig::current();

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let show_password = RwSignal::new(false);
    let busy = RwSignal::new(false);
    let google_busy = RwSignal::new(false);

    {
        let navigate = navigate.clone();
        actions.complete_google_sign_in(GoogleFlow::SignUp, google_busy, move || {
            navigate(DASHBOARD_PATH, NavigateOptions::default());
        });
    }

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        busy.set(true);
        let form = RegisterForm {
            name: name.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
            confirm_password: confirm_password.get_untracked(),
        };
        let navigate = navigate.clone();
        actions.run(AuthRequest::Register(form), move |ok| {
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
            google::begin_sign_in(client_id, REGISTER_PATH);
        }
    };

    let password_hint_text = move || password.with(|p| password_hint(p));
    let confirmation_hint_text = move || password.with(|p| confirm_password.with(|c| confirmation_hint(p, c)));

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Create your account"</h1>
                <p class="auth-card__subtitle">"Join Edwardo in under a minute"</p>
                <form class="auth-form" on:submit=on_submit>
                    <label class="auth-label" for="register-name">"Name"</label>
                    <input
                        id="register-name"
                        class="auth-input"
                        type="text"
                        autocomplete="name"
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))
                    />
                    <label class="auth-label" for="register-email">"Email"</label>
                    <input
                        id="register-email"
                        class="auth-input"
                        type="email"
                        autocomplete="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <label class="auth-label" for="register-password">"Password"</label>
                    <div class="auth-password">
                        <input
                            id="register-password"
                            class="auth-input"
                            type=move || password_input_type(show_password.get())
                            autocomplete="new-password"
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
                    <p class="auth-hint">{password_hint_text}</p>
                    <label class="auth-label" for="register-confirm">"Confirm password"</label>
                    <input
                        id="register-confirm"
                        class="auth-input"
                        type=move || password_input_type(show_password.get())
                        autocomplete="new-password"
                        prop:value=move || confirm_password.get()
                        on:input=move |ev| confirm_password.set(event_target_value(&ev))
                    />
                    <p class="auth-hint">{confirmation_hint_text}</p>
                    <button class="btn btn--primary auth-submit" type="submit" disabled=move || busy.get()>
                        {move || submit_label(busy.get(), "Create Account", "Creating account...")}
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
                        {move || submit_label(google_busy.get(), "Sign up with Google", "Connecting...")}
                    </button>
                </Show>
                <p class="auth-card__footer">
                    "Already have an account? "
                    <a href=LOGIN_PATH>"Sign in"</a>
                </p>
            </div>
        </div>
    }
}
