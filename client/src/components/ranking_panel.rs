//! Top-points leaderboard with the current user's rank, re-polled on an
//! interval while mounted.

use leptos::prelude::*;
use panels::ranking::{Board, MSG_EMPTY, RankingState, TOP_LIMIT};

use crate::net::api;
use crate::state::auth::AuthState;
use crate::util::browser;
use crate::util::poller::Poller;
use crate::util::storage::LocalStore;

fn poll(state: RwSignal<RankingState>, auth: RwSignal<AuthState>) {
    let Some(top_seq) = state.try_update(RankingState::begin_top) else {
        return;
    };
    browser::spawn(async move {
        let result = api::ranking_top(TOP_LIMIT).await;
        state.try_update(|ranking| ranking.apply_top(top_seq, result));
    });

    let Some(user_id) = auth.with_untracked(|auth| auth.user_id().map(str::to_owned)) else {
        return;
    };
    let Some(user_seq) = state.try_update(RankingState::begin_user) else {
        return;
    };
    browser::spawn(async move {
        let result = api::user_rank(&user_id).await;
        let points = state.try_update(|ranking| ranking.apply_user(user_seq, result)).flatten();
        if let Some(points) = points {
            auth.try_update(|auth| auth.update_points(&LocalStore, points));
        }
    });
}

#[component]
pub fn RankingPanel() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let state = RwSignal::new(RankingState::new());

    let poller = Poller::start(crate::config::app().ranking_interval, move || poll(state, auth));
    on_cleanup(move || poller.stop());

    let board = move || match state.get().board().clone() {
        Board::Loading => view! { <p class="ranking__status">"Loading..."</p> }.into_any(),
        Board::Empty => view! { <p class="ranking__status">{MSG_EMPTY}</p> }.into_any(),
        Board::Failed(message) => view! { <p class="ranking__status ranking__status--error">{message}</p> }.into_any(),
        Board::Entries(rows) => view! {
            <ol class="ranking__list">
                {rows
                    .into_iter()
                    .map(|row| {
                        view! {
                            <li class="ranking__row">
                                <span class="ranking__rank">{row.rank}</span>
                                <span class="ranking__name">{row.nickname}</span>
                                <span class="ranking__points">{row.points}</span>
                            </li>
                        }
                    })
                    .collect_view()}
            </ol>
        }
        .into_any(),
    };

    let me = move || {
        state.get().me().map(|me| {
            view! {
                <div class="ranking__me">
                    <span>"My rank"</span>
                    <strong>{me.rank_label()}</strong>
                    <span>{me.points_label()}</span>
                </div>
            }
        })
    };

    view! {
        <section class="ranking">
            <h2>"Point Ranking"</h2>
            {board}
            {me}
        </section>
    }
}
