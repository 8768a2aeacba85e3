//! Toast stack for operation results. Click a toast to dismiss it early.

use leptos::prelude::*;

use crate::state::notice::{Notice, NoticeState};

#[component]
pub fn Toasts() -> impl IntoView {
    let notices = expect_context::<RwSignal<NoticeState>>();

    view! {
        <div class="toasts" role="status" aria-live="polite">
            <For
                each=move || notices.get().items
                key=|notice| notice.id
                children=move |notice: Notice| {
                    let id = notice.id;
                    view! {
                        <div class=notice.kind.css_class() on:click=move |_| notices.update(|n| n.dismiss(id))>
                            {notice.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
