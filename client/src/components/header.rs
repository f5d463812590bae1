//! Top navigation bar with the balance and the logout button.

use leptos::prelude::*;
use leptos_router::components::A;
use panels::account::MSG_LOGOUT_CONFIRM;
use panels::format;

use crate::components::session_modal::SessionSlot;
use crate::state::auth::AuthState;
use crate::util::browser;
use crate::util::storage::LocalStore;

const NAV: [(&str, &str); 6] = [
    ("/", "Home"),
    ("/events", "Events"),
    ("/quiz", "Quiz"),
    ("/stock", "Stock"),
    ("/store", "Store"),
    ("/mypage", "My Page"),
];

#[component]
pub fn AppHeader() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let slot = expect_context::<SessionSlot>();

    let on_logout = move |_| {
        if !browser::confirm(MSG_LOGOUT_CONFIRM) {
            return;
        }
        slot.dispose();
        auth.update(|auth| auth.sign_out(&LocalStore));
        log::info!("user logged out from header");
        browser::redirect(crate::config::app().login_path);
    };

    let name = move || auth.with(|auth| auth.display_name().unwrap_or_default().to_owned());
    let logged_in = move || auth.with(AuthState::is_logged_in);
    let balance = move || auth.with(|auth| auth.points().map(format::points));

    view! {
        <header class="app-header">
            <A href="/" attr:class="app-header__brand">"Points Center"</A>
            <nav class="app-header__nav">
                {NAV
                    .into_iter()
                    .map(|(href, label)| view! { <A href=href attr:class="app-header__link">{label}</A> })
                    .collect_view()}
            </nav>
            <Show when=logged_in>
                <div class="app-header__user">
                    <span class="app-header__name">{name}</span>
                    {move || balance().map(|points| view! { <span class="app-header__points">{points}</span> })}
                    <button class="btn btn--ghost" on:click=on_logout>"Log out"</button>
                </div>
            </Show>
        </header>
    }
}
