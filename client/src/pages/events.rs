//! Point events: daily check-in, number guessing and ad watching.
//!
//! SYSTEM CONTEXT
//! ==============
//! All three panels read the same `GET /point/{user}/status` but each owns
//! its own `PageView`, so a slow reload in one never blocks the others.
//!
//! DESIGN
//! ======
//! Every request follows the same shape: take a ticket from the panel state
//! under `try_update`, run the call in `browser::spawn`, hand the ticket back
//! with the result. `try_update` returning `None` means the page was left;
//! the response is dropped.

use std::time::Duration;

use leptos::prelude::*;
use panels::ad_watch::{AdPhase, AdWatch, COUNTDOWN_SECS, MAX_WATCHES, Tick};
use panels::api::{GameResultRequest, PointStatus};
use panels::attendance::{Attendance, CheckInPhase, DayClick, DayMark};
use panels::number_game::{CHANCES, GamePhase, NumberGame, RANGE};
use panels::{ApiError, Notice, Ticket, format};
use session::Identity;

use crate::components::load_gate::{LoadGate, NoticeLine};
use crate::components::toast::notify;
use crate::net::api;
use crate::state::auth::AuthState;
use crate::state::ui::UiState;
use crate::util::auth::require_user;
use crate::util::browser;
use crate::util::storage::LocalStore;

/// Fetch point status into a panel through its enter hooks.
fn enter<T: Send + Sync + 'static>(
    state: RwSignal<T>,
    user_id: String,
    begin: impl FnOnce(&mut T) -> Ticket,
    loaded: impl FnOnce(&mut T, Ticket, PointStatus) -> bool + 'static,
    failed: impl FnOnce(&mut T, Ticket, &ApiError) -> bool + 'static,
) {
    let Some(ticket) = state.try_update(begin) else { return };
    browser::spawn(async move {
        match api::point_status(&user_id).await {
            Ok(status) => {
                state.try_update(|panel| loaded(panel, ticket, status));
            }
            Err(err) => {
                log::warn!("events: status load failed: {err}");
                state.try_update(|panel| failed(panel, ticket, &err));
            }
        }
    });
}

fn sync_points(auth: RwSignal<AuthState>, total: Option<i64>) {
    if let Some(total) = total {
        auth.try_update(|auth| auth.update_points(&LocalStore, total));
    }
}

#[component]
pub fn EventsPage() -> impl IntoView {
    let Ok(identity) = require_user() else {
        return ().into_any();
    };

    view! {
        <div class="events-page">
            <h1>"Point Events"</h1>
            <CheckInPanel identity=identity.clone()/>
            <NumberGamePanel identity=identity.clone()/>
            <AdWatchPanel identity=identity/>
        </div>
    }
    .into_any()
}

// =============================================================================
// DAILY CHECK-IN
// =============================================================================

#[component]
fn CheckInPanel(identity: Identity) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let state = RwSignal::new(Attendance::new());
    let user_id = StoredValue::new(identity.user_id);

    let load = move || enter(state, user_id.get_value(), Attendance::begin_enter, Attendance::loaded, Attendance::failed);
    load();

    let refresh = move || {
        let Some(ticket) = state.try_update(|panel| panel.view_mut().begin_refresh()) else { return };
        let user_id = user_id.get_value();
        browser::spawn(async move {
            let result = api::point_status(&user_id).await;
            state.try_update(|panel| match result {
                Ok(status) => panel.view_mut().refresh_loaded(ticket, status),
                Err(err) => panel.view_mut().refresh_failed(ticket, &err),
            });
        });
    };

    let on_click = move |index: u32| {
        let Some(click) = state.try_update(|panel| panel.click(index)) else { return };
        let ticket = match click {
            DayClick::Submit(ticket) => ticket,
            other => {
                if let Some(message) = other.message() {
                    notify(ui, Notice::info(message));
                }
                return;
            }
        };
        let user_id = user_id.get_value();
        browser::spawn(async move {
            match api::attendance(&user_id).await {
                Ok(reply) => {
                    let toast = state.try_update(|panel| panel.checked_in(ticket, &reply)).flatten();
                    if let Some(toast) = toast {
                        sync_points(auth, reply.total_point);
                        notify(ui, toast);
                        refresh();
                    }
                }
                Err(err) => {
                    log::warn!("check-in failed: {err}");
                    state.try_update(|panel| panel.check_in_failed(ticket, &err));
                }
            }
        });
    };

    let days = move || {
        state
            .with(Attendance::days)
            .into_iter()
            .map(|day| {
                let class = match day.mark {
                    DayMark::Checked => "day day--checked",
                    DayMark::Today => "day day--today",
                    DayMark::Upcoming => "day",
                };
                view! {
                    <button class=class disabled=!day.clickable on:click=move |_| on_click(day.index)>
                        <span class="day__label">{day.label()}</span>
                        <span class="day__reward">{format!("+{}", format::points(day.reward))}</span>
                    </button>
                }
            })
            .collect_view()
    };

    let summary = move || {
        state.with(|panel| {
            let done = *panel.view().phase() == CheckInPhase::AlreadyDone;
            let streak = panel.view().status().map_or(0, |status| status.consecutive_days);
            if done {
                format!("Checked in today. Streak: {streak} days")
            } else {
                format!("Streak: {streak} days. Check in for today!")
            }
        })
    };

    view! {
        <section class="panel check-in">
            <h2>"Daily Check-in"</h2>
            <LoadGate load=Signal::derive(move || state.with(|panel| panel.view().load().clone())) on_retry=Callback::new(move |()| load())>
                <p class="check-in__summary">{summary}</p>
                <div class="check-in__days">{days}</div>
                <NoticeLine notice=Signal::derive(move || state.with(|panel| panel.view().notice().cloned()))/>
            </LoadGate>
        </section>
    }
}

// =============================================================================
// NUMBER GUESS
// =============================================================================

fn settle(state: RwSignal<NumberGame>, auth: RwSignal<AuthState>, user_id: String) {
    let Some(Ok((ticket, won))) = state.try_update(NumberGame::begin_settle) else { return };
    browser::spawn(async move {
        let request = GameResultRequest { user_id, won };
        match api::game_result(&request).await {
            Ok(reply) => {
                let applied = state.try_update(|game| game.settled(ticket, &reply)).unwrap_or(false);
                if applied {
                    sync_points(auth, reply.total_point);
                }
            }
            Err(err) => {
                log::warn!("game result report failed: {err}");
                state.try_update(|game| game.settle_failed(ticket, &err));
            }
        }
    });
}

#[component]
fn NumberGamePanel(identity: Identity) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let state = RwSignal::new(NumberGame::new(browser::random_in(RANGE)));
    let input = RwSignal::new(String::new());
    let user_id = StoredValue::new(identity.user_id);

    let load = move || enter(state, user_id.get_value(), NumberGame::begin_enter, NumberGame::loaded, NumberGame::failed);
    load();

    let on_guess = move || {
        let text = input.get_untracked();
        let outcome = state.try_update(|game| game.guess(&text)).flatten();
        if outcome.is_some() {
            input.set(String::new());
        }
        if matches!(state.with_untracked(|game| *game.view().phase()), GamePhase::Settling { .. }) {
            settle(state, auth, user_id.get_value());
        }
    };

    let hint = move || state.with(|game| game.last_guess().and_then(|guess| guess.hint()));
    let can_retry_settle = move || {
        state.with(|game| matches!(game.view().phase(), GamePhase::Settling { .. }) && !game.view().is_pending())
    };

    let (lo, hi) = (*RANGE.start(), *RANGE.end());
    let body = move || {
        let phase = state.with(|game| *game.view().phase());
        match phase {
            GamePhase::AlreadyPlayed => view! {
                <p class="number-game__done">{panels::number_game::MSG_ALREADY_PLAYED}</p>
            }
            .into_any(),
            GamePhase::Settled { .. } => view! {
                <p class="number-game__result">{move || state.with(|game| game.result().unwrap_or_default().to_owned())}</p>
            }
            .into_any(),
            GamePhase::Guessing | GamePhase::Settling { .. } => view! {
                <p>{format!("Guess a number from {lo} to {hi}.")}</p>
                <p class="number-game__chances">{move || format!("Chances left: {} / {CHANCES}", state.with(NumberGame::chances))}</p>
                <form
                    class="number-game__form"
                    on:submit=move |ev| {
                        ev.prevent_default();
                        on_guess();
                    }
                >
                    <input
                        type="number"
                        min=lo.to_string()
                        max=hi.to_string()
                        prop:value=move || input.get()
                        on:input=move |ev| input.set(event_target_value(&ev))
                        disabled=move || !state.with(NumberGame::can_guess)
                    />
                    <button class="btn btn--primary" type="submit" disabled=move || !state.with(NumberGame::can_guess)>
                        "Guess"
                    </button>
                </form>
                {move || hint().map(|text| view! { <p class="number-game__hint">{text}</p> })}
                <Show when=can_retry_settle>
                    <button class="btn" on:click=move |_| settle(state, auth, user_id.get_value())>"Report result"</button>
                </Show>
            }
            .into_any(),
        }
    };

    view! {
        <section class="panel number-game">
            <h2>"Number Guess"</h2>
            <LoadGate load=Signal::derive(move || state.with(|game| game.view().load().clone())) on_retry=Callback::new(move |()| load())>
                {body}
                <NoticeLine notice=Signal::derive(move || state.with(|game| game.view().notice().cloned()))/>
            </LoadGate>
        </section>
    }
}

// =============================================================================
// AD WATCH
// =============================================================================

fn claim(state: RwSignal<AdWatch>, auth: RwSignal<AuthState>, ui: RwSignal<UiState>, user_id: String) {
    let Some(Ok(ticket)) = state.try_update(AdWatch::begin_claim) else { return };
    browser::spawn(async move {
        match api::gain_ad(&user_id).await {
            Ok(reply) => {
                let toast = state.try_update(|ad| ad.claimed(ticket, &reply)).flatten();
                if let Some(toast) = toast {
                    sync_points(auth, reply.total_point);
                    notify(ui, toast);
                }
            }
            Err(err) => {
                log::warn!("ad reward claim failed: {err}");
                state.try_update(|ad| ad.claim_failed(ticket, &err));
            }
        }
    });
}

#[component]
fn AdWatchPanel(identity: Identity) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let state = RwSignal::new(AdWatch::new());
    let user_id = StoredValue::new(identity.user_id);

    let load = move || enter(state, user_id.get_value(), AdWatch::begin_enter, AdWatch::loaded, AdWatch::failed);
    load();
    on_cleanup(move || {
        state.try_update(AdWatch::cancel);
    });

    let on_start = move |_| {
        if !matches!(state.try_update(AdWatch::start), Some(Ok(_))) {
            return;
        }
        log::debug!("ad countdown started ({COUNTDOWN_SECS}s)");
        browser::spawn(async move {
            loop {
                browser::sleep(Duration::from_secs(1)).await;
                match state.try_update(AdWatch::tick) {
                    Some(Tick::Continue { .. }) => {}
                    Some(Tick::Claim) => {
                        claim(state, auth, ui, user_id.get_value());
                        break;
                    }
                    Some(Tick::Idle) | None => break,
                }
            }
        });
    };

    let body = move || {
        let (phase, pending) = state.with(|ad| (*ad.view().phase(), ad.view().is_pending()));
        match phase {
            AdPhase::Ready => view! {
                <button class="btn btn--primary" on:click=on_start>"Watch ad"</button>
            }
            .into_any(),
            AdPhase::Counting { remaining } => view! {
                <div class="ad-watch__player">
                    <p>"Ad playing..."</p>
                    <p class="ad-watch__countdown">{format!("{remaining}s")}</p>
                </div>
            }
            .into_any(),
            AdPhase::Claiming if pending => view! { <p>"Claiming reward..."</p> }.into_any(),
            AdPhase::Claiming => view! {
                <button class="btn btn--primary" on:click=move |_| claim(state, auth, ui, user_id.get_value())>
                    "Claim reward"
                </button>
            }
            .into_any(),
            AdPhase::Exhausted => view! { <p>{panels::ad_watch::MSG_EXHAUSTED}</p> }.into_any(),
        }
    };

    view! {
        <section class="panel ad-watch">
            <h2>"Watch Ads"</h2>
            <LoadGate load=Signal::derive(move || state.with(|ad| ad.view().load().clone())) on_retry=Callback::new(move |()| load())>
                <p class="ad-watch__count">
                    {move || {
                        let (watched, left) = state.with(|ad| (ad.watched(), ad.remaining_watches()));
                        format!("Today: {watched} / {MAX_WATCHES} ({left} left)")
                    }}
                </p>
                {body}
                <NoticeLine notice=Signal::derive(move || state.with(|ad| ad.view().notice().cloned()))/>
            </LoadGate>
        </section>
    }
}
