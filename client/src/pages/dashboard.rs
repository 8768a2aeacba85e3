//! Dashboard page: profile overview plus session maintenance actions.
//!
//! SYSTEM CONTEXT
//! ==============
//! Only reachable behind `ProtectedRoute`. Every action goes through
//! `AuthActions`, so the session store and toasts stay consistent with the
//! rest of the app. Deleting the account ends the session, and the guard
//! then moves the user back to the landing page.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use serde_json::Value;
use session::UserProfile;
use session::gateway::AuthRequest;

use super::login::submit_label;
use crate::util::auth::AuthActions;

/// Profile fields as display rows, sorted by key. String values render
/// without JSON quoting.
#[must_use]
pub fn profile_rows(profile: &UserProfile) -> Vec<(String, String)> {
    let mut rows: Vec<(String, String)> = profile
        .0
        .iter()
        .map(|(key, value)| {
            let shown = match value {
                Value::String(s) => s.clone(),
                Value::Null => String::new(),
                other => other.to_string(),
            };
            (key.clone(), shown)
        })
        .collect();
    rows.sort_by(|a, b| a.0.cmp(&b.0));
    rows
}

/// Strip whitespace a user may paste along with a verification code.
#[must_use]
pub fn normalize_otp_input(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Greeting line for the dashboard header.
#[must_use]
pub fn greeting(profile: Option<&UserProfile>) -> String {
    match profile.and_then(UserProfile::display_name) {
        Some(name) => format!("Welcome, {name}"),
        None => "Welcome".to_owned(),
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let actions = AuthActions::from_context();
    let auth = actions.auth;

    let profile = move || auth.with(|s| s.session().and_then(|session| session.profile().cloned()));
    let rows = move || profile().map(|p| profile_rows(&p)).unwrap_or_default();

    let refreshing = RwSignal::new(false);
    let on_refresh = move |_| {
        if refreshing.get_untracked() {
            return;
        }
        refreshing.set(true);
        actions.run(AuthRequest::Refresh, move |_| refreshing.set(false));
    };

    let confirm_delete = RwSignal::new(false);
    let deleting = RwSignal::new(false);
    let on_delete = move |_| {
        if deleting.get_untracked() {
            return;
        }
        deleting.set(true);
        actions.run(AuthRequest::DeleteAccount, move |_| {
            deleting.set(false);
            confirm_delete.set(false);
        });
    };

    let otp_sent = RwSignal::new(false);
    let otp_code = RwSignal::new(String::new());
    let otp_busy = RwSignal::new(false);
    let on_send_otp = move |_| {
        if otp_busy.get_untracked() {
            return;
        }
        otp_busy.set(true);
        actions.run(AuthRequest::SendOtp, move |ok| {
            otp_busy.set(false);
            if ok {
                otp_sent.set(true);
            }
        });
    };
    let on_verify_otp = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if otp_busy.get_untracked() {
            return;
        }
        otp_busy.set(true);
        let code = otp_code.get_untracked();
        actions.run(AuthRequest::VerifyOtp { code }, move |ok| {
            otp_busy.set(false);
            if ok {
                otp_sent.set(false);
                otp_code.set(String::new());
            }
        });
    };

    view! {
        <div class="dashboard-page">
            <header class="dashboard-header">
                <h1>{move || greeting(profile().as_ref())}</h1>
                <button class="btn btn--ghost" on:click=on_refresh disabled=move || refreshing.get()>
                    {move || submit_label(refreshing.get(), "Refresh Session", "Refreshing...")}
                </button>
            </header>

            <section class="dashboard-card">
                <h2>"Profile"</h2>
                <Show
                    when=move || !rows().is_empty()
                    fallback=|| view! { <p class="dashboard-empty">"No profile details yet."</p> }
                >
                    <dl class="profile-list">
                        <For
                            each=rows
                            key=|row| row.0.clone()
                            children=|(key, value)| {
                                view! {
                                    <dt>{key}</dt>
                                    <dd>{value}</dd>
                                }
                            }
                        />
                    </dl>
                </Show>
            </section>

            <section class="dashboard-card">
                <h2>"Verify your email"</h2>
                <Show
                    when=move || otp_sent.get()
                    fallback=move || {
                        view! {
                            <button class="btn btn--primary" on:click=on_send_otp disabled=move || otp_busy.get()>
                                {move || submit_label(otp_busy.get(), "Send Code", "Sending...")}
                            </button>
                        }
                    }
                >
                    <form class="otp-form" on:submit=on_verify_otp>
                        <input
                            class="auth-input"
                            type="text"
                            inputmode="numeric"
                            autocomplete="one-time-code"
                            placeholder="Verification code"
                            prop:value=move || otp_code.get()
                            on:input=move |ev| otp_code.set(normalize_otp_input(&event_target_value(&ev)))
                        />
                        <button class="btn btn--primary" type="submit" disabled=move || otp_busy.get()>
                            {move || submit_label(otp_busy.get(), "Verify", "Verifying...")}
                        </button>
                    </form>
                </Show>
            </section>

            <section class="dashboard-card dashboard-card--danger">
                <h2>"Delete account"</h2>
                <p>"This permanently removes your account and signs you out."</p>
                <Show
                    when=move || confirm_delete.get()
                    fallback=move || {
                        view! {
                            <button class="btn btn--danger" on:click=move |_| confirm_delete.set(true)>
                                "Delete Account"
                            </button>
                        }
                    }
                >
                    <div class="dialog-actions">
                        <button class="btn btn--ghost" on:click=move |_| confirm_delete.set(false)>
                            "Cancel"
                        </button>
                        <button class="btn btn--danger" on:click=on_delete disabled=move || deleting.get()>
                            {move || submit_label(deleting.get(), "Yes, delete", "Deleting...")}
                        </button>
                    </div>
                </Show>
            </section>
        </div>
    }
}
