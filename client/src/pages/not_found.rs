use leptos::prelude::*;
use session::guard::LANDING_PATH;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="not-found-page">
            <h1>"Page not found"</h1>
            <a href=LANDING_PATH>"Back to home"</a>
        </div>
    }
}
