//! Landing page: greeting, shortcuts, and the live ranking.

use leptos::prelude::*;
use leptos_router::components::A;
use panels::account;

use crate::components::ranking_panel::RankingPanel;
use crate::state::auth::AuthState;
use crate::util::auth::require_user;

const SHORTCUTS: [(&str, &str, &str); 4] = [
    ("/events", "📅 Point events", "Check in, guess the number, watch ads"),
    ("/quiz", "📝 Daily quiz", "Three topics, points per question"),
    ("/stock", "📈 Stock prediction", "Call today's close"),
    ("/store", "🛍️ Point store", "Spend points on rewards"),
];

#[component]
pub fn HomePage() -> impl IntoView {
    if require_user().is_err() {
        return ().into_any();
    }
    let auth = expect_context::<RwSignal<AuthState>>();

    view! {
        <div class="home-page">
            <h1>{move || auth.with(|auth| account::greeting(auth.nickname()))}</h1>
            <div class="home-page__shortcuts">
                {SHORTCUTS
                    .into_iter()
                    .map(|(href, title, blurb)| {
                        view! {
                            <A href=href attr:class="home-page__card">
                                <strong>{title}</strong>
                                <span>{blurb}</span>
                            </A>
                        }
                    })
                    .collect_view()}
            </div>
            <RankingPanel/>
        </div>
    }
    .into_any()
}
