//! Public landing page with the primary calls to action.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use session::guard::{DASHBOARD_PATH, REGISTER_PATH};

const FEATURES: [(&str, &str); 3] = [
    ("Learn at your pace", "Short lessons that fit between meetings and lectures."),
    ("Track progress", "Your dashboard keeps every course and milestone in one place."),
    ("Secure by default", "Sign in with email or Google; your session stays on this device."),
];

#[component]
pub fn LandingPage() -> impl IntoView {
    let navigate = use_navigate();
    let go_dashboard = navigate.clone();
    let go_register = navigate;

    view! {
        <div class="landing-page">
            <section class="landing-hero">
                <h1>"Welcome to Edwardo"</h1>
                <p class="landing-hero__tagline">"Everything you need to keep learning, in one place."</p>
                <div class="landing-hero__actions">
                    <button
                        class="btn btn--primary"
                        on:click=move |_| go_dashboard(DASHBOARD_PATH, NavigateOptions::default())
                    >
                        "Go to Dashboard"
                    </button>
                    <button
                        class="btn btn--ghost"
                        on:click=move |_| go_register(REGISTER_PATH, NavigateOptions::default())
                    >
                        "Create an Account"
                    </button>
                </div>
            </section>
            <section class="landing-features">
                {FEATURES
                    .iter()
                    .map(|(title, body)| {
                        view! {
                            <article class="landing-feature">
                                <h3>{*title}</h3>
                                <p>{*body}</p>
                            </article>
                        }
                    })
                    .collect_view()}
            </section>
        </div>
    }
}
