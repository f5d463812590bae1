//! Root application component with routing, shared state, and the session
//! watchdog shell.

use leptos::prelude::*;
use leptos_meta::{Stylesheet, Title, provide_meta_context};
use leptos_router::hooks::use_location;
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};
use session::should_install;
use session::store::is_unguarded_route;

use crate::components::header::AppHeader;
use crate::components::session_modal::{SessionSlot, SessionWarningModal};
use crate::components::toast::Toast;
use crate::pages::{
    events::EventsPage, home::HomePage, login::LoginPage, mypage::MyPagePage, quiz::QuizPage, sign_up::SignUpPage,
    stock::StockPage, store::StorePage,
};
use crate::state::{auth::AuthState, ui::UiState};
use crate::util::storage::LocalStore;

/// Root application component.
///
/// Provides the shared state contexts and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::load(&LocalStore));
    let ui = RwSignal::new(UiState::default());
    let slot = SessionSlot::new();

    provide_context(auth);
    provide_context(ui);
    provide_context(slot);

    view! {
        <Stylesheet id="app" href="/pkg/points-center.css"/>
        <Title text="Points Center"/>

        <Router>
            <SessionShell/>
            <main class="app-main">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("sign-up") view=SignUpPage/>
                    <Route path=StaticSegment("") view=HomePage/>
                    <Route path=StaticSegment("events") view=EventsPage/>
                    <Route path=StaticSegment("quiz") view=QuizPage/>
                    <Route path=StaticSegment("stock") view=StockPage/>
                    <Route path=StaticSegment("store") view=StorePage/>
                    <Route path=StaticSegment("mypage") view=MyPagePage/>
                </Routes>
            </main>
            <Toast/>
            <SessionWarningModal/>
        </Router>
    }
}

/// Installs the idle watchdog on guarded routes and tears it down on the
/// login/sign-up entry points. Also owns the header, which is hidden there.
#[component]
fn SessionShell() -> impl IntoView {
    let slot = expect_context::<SessionSlot>();
    let location = use_location();

    Effect::new(move |_| {
        let path = location.pathname.get();
        if should_install(&path, &LocalStore) {
            if !slot.is_installed() {
                slot.install();
            }
        } else if is_unguarded_route(&path) && slot.is_installed() {
            slot.dispose();
        }
    });
    on_cleanup(move || slot.dispose());

    move || (!is_unguarded_route(&location.pathname.get())).then(|| view! { <AppHeader/> })
}
