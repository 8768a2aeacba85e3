//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::guards::{ProtectedRoute, RedirectRoute};
use crate::components::loading::LoadingView;
use crate::components::navbar::Navbar;
use crate::components::toasts::Toasts;
use crate::pages::{
    dashboard::DashboardPage, landing::LandingPage, login::LoginPage, not_found::NotFoundPage,
    register::RegisterPage,
};
use crate::state::{auth::AuthState, notice::NoticeState};

/// Root application component.
///
/// Provides the auth and notice contexts, rehydrates the persisted session
/// once mounted, and sets up client-side routing. Nothing route-level renders
/// until rehydration has finished.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::default());
    let notices = RwSignal::new(NoticeState::default());

    provide_context(auth);
    provide_context(notices);

    Effect::new(move || {
        if auth.with_untracked(AuthState::loading) {
            auth.set(AuthState::rehydrated());
        }
    });

    view! {
        <Stylesheet id="edwardo" href="/style/main.css"/>
        <Title text="Edwardo"/>

        <Router>
            <Show when=move || !auth.with(AuthState::loading) fallback=|| view! { <LoadingView/> }>
                <Navbar/>
                <main class="app-main">
                    <Routes fallback=|| view! { <NotFoundPage/> }>
                        <Route path=StaticSegment("") view=RedirectRoute/>
                        <Route path=StaticSegment("Home") view=LandingPage/>
                        <Route path=StaticSegment("Login") view=LoginPage/>
                        <Route path=StaticSegment("Register") view=RegisterPage/>
                        <Route
                            path=StaticSegment("Dashboard")
                            view=|| view! { <ProtectedRoute><DashboardPage/></ProtectedRoute> }
                        />
                    </Routes>
                </main>
            </Show>
            <Toasts/>
        </Router>
    }
}
