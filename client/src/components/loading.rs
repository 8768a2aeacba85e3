//! Neutral placeholder shown while the session is rehydrating.

use leptos::prelude::*;

#[component]
pub fn LoadingView() -> impl IntoView {
    view! {
        <div class="loading" aria-busy="true">
            <div class="loading__spinner"></div>
        </div>
    }
}
