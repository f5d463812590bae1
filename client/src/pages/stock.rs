//! Stock prediction: today's up/down call and the claimable history.

use leptos::prelude::*;
use panels::api::Trend;
use panels::stock::{CORRECT_REWARD, History, MSG_ALREADY_DONE, MSG_PICK_TREND, PredictPhase, Prediction, StockView, ai_trend, is_claimable};
use panels::{Notice, SubmitRejected, format};

use crate::components::load_gate::{LoadGate, NoticeLine};
use crate::components::toast::notify;
use crate::net::api;
use crate::state::auth::AuthState;
use crate::state::ui::UiState;
use crate::util::auth::require_user;
use crate::util::browser;
use crate::util::storage::LocalStore;

#[component]
pub fn StockPage() -> impl IntoView {
    let Ok(identity) = require_user() else {
        return ().into_any();
    };
    let current = RwSignal::new(StockView::default());
    let user_id = StoredValue::new(identity.user_id);

    let back = move || {
        view! { <button class="btn btn--ghost" on:click=move |_| current.set(StockView::Menu)>"← Back"</button> }
    };

    let body = move || match current.get() {
        StockView::Menu => view! {
            <div class="stock__menu">
                <button class="stock__menu-item" on:click=move |_| current.set(StockView::Game)>
                    <strong>"Today's prediction"</strong>
                    <span>"Will it close up or down?"</span>
                </button>
                <button class="stock__menu-item" on:click=move |_| current.set(StockView::History)>
                    <strong>"My predictions"</strong>
                    <span>"Results and rewards"</span>
                </button>
            </div>
        }
        .into_any(),
        StockView::Game => view! { {back()} <PredictionGame user_id=user_id.get_value()/> }.into_any(),
        StockView::History => view! { {back()} <PredictionHistory user_id=user_id.get_value()/> }.into_any(),
    };

    view! {
        <div class="stock-page">
            <h1>"Stock Prediction"</h1>
            {body}
        </div>
    }
    .into_any()
}

// =============================================================================
// GAME
// =============================================================================

#[component]
fn PredictionGame(user_id: String) -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let state = RwSignal::new(Prediction::new());
    let user_id = StoredValue::new(user_id);

    let load = move || {
        let Some(ticket) = state.try_update(Prediction::begin_enter) else { return };
        let user_id = user_id.get_value();
        browser::spawn(async move {
            let result = api::stock_game_data(&user_id).await;
            state.try_update(|game| match result {
                Ok(data) => game.loaded(ticket, data),
                Err(err) => game.failed(ticket, &err),
            });
        });
    };
    load();

    let submit = move || {
        let user_id = user_id.get_value();
        let (ticket, request) = match state.try_update(|game| game.begin_submit(&user_id)) {
            Some(Ok(started)) => started,
            Some(Err(SubmitRejected::MissingInput)) => {
                notify(ui, Notice::info(MSG_PICK_TREND));
                return;
            }
            _ => return,
        };
        browser::spawn(async move {
            match api::submit_prediction(&request).await {
                Ok(reply) => {
                    if let Some(toast) = state.try_update(|game| game.submitted(ticket, &reply)).flatten() {
                        notify(ui, toast);
                    }
                }
                Err(err) => {
                    log::warn!("prediction for {} failed: {err}", request.stock_code);
                    state.try_update(|game| game.submit_failed(ticket, &err));
                }
            }
        });
    };

    let trend_button = move |trend: Trend| {
        let class = move || {
            if state.with(|game| game.choice()) == Some(trend) { "btn trend trend--selected" } else { "btn trend" }
        };
        view! {
            <button
                class=class
                disabled=move || state.with(|game| game.view().is_pending())
                on:click=move |_| {
                    state.try_update(|game| game.choose(trend));
                }
            >
                {trend.label()}
            </button>
        }
    };

    let stock_card = move || {
        state.with(|game| {
            game.view().status().map(|data| {
                let price = data.current_price.map(|p| format!("{p:.0}")).unwrap_or_else(|| "-".to_owned());
                let outlook = data.sentiment_outlook.clone();
                view! {
                    <div class="stock__card">
                        <h2>{format!("{} ({})", data.stock_name, data.stock_code)}</h2>
                        <p>{format!("Current price: {price}")}</p>
                        {outlook.map(|text| view! { <p class="stock__outlook">{text}</p> })}
                    </div>
                }
            })
        })
    };

    let body = move || match state.with(|game| *game.view().phase()) {
        PredictPhase::AlreadyDone => view! { <p>{MSG_ALREADY_DONE}</p> }.into_any(),
        PredictPhase::Submitted { choice, ai_match } => {
            let ai = state.with(|game| game.view().status().and_then(ai_trend));
            let comparison = match (ai, ai_match) {
                (Some(ai), Some(true)) => format!("You agreed with the AI ({}).", ai.label()),
                (Some(ai), Some(false)) => format!("You went against the AI ({}).", ai.label()),
                _ => "No AI outlook today.".to_owned(),
            };
            view! {
                <div class="stock__submitted">
                    <p>{format!("Your call: {}", choice.label())}</p>
                    <p>{comparison}</p>
                </div>
            }
            .into_any()
        }
        PredictPhase::Choosing { .. } => view! {
            <div class="stock__choices">{trend_button(Trend::Up)} {trend_button(Trend::Down)}</div>
            <textarea
                class="stock__reasoning"
                placeholder="Why do you think so? (optional)"
                prop:value=move || state.with(|game| game.reasoning().to_owned())
                on:input=move |ev| state.update(|game| game.set_reasoning(&event_target_value(&ev)))
            ></textarea>
            <button
                class="btn btn--primary"
                disabled=move || state.with(|game| game.view().is_pending())
                on:click=move |_| submit()
            >
                "Submit prediction"
            </button>
        }
        .into_any(),
    };

    view! {
        <section class="panel stock__game">
            <LoadGate load=Signal::derive(move || state.with(|game| game.view().load().clone())) on_retry=Callback::new(move |()| load())>
                {stock_card}
                {body}
                <NoticeLine notice=Signal::derive(move || state.with(|game| game.view().notice().cloned()))/>
            </LoadGate>
        </section>
    }
}

// =============================================================================
// HISTORY
// =============================================================================

#[component]
fn PredictionHistory(user_id: String) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let state = RwSignal::new(History::new());
    let user_id = StoredValue::new(user_id);

    let load = move || {
        let Some(ticket) = state.try_update(History::begin_enter) else { return };
        let user_id = user_id.get_value();
        browser::spawn(async move {
            let result = api::stock_history(&user_id).await;
            state.try_update(|history| match result {
                Ok(records) => history.loaded(ticket, records),
                Err(err) => history.failed(ticket, &err),
            });
        });
    };
    load();

    let claim = move |prediction_id: i64| {
        let user_id = user_id.get_value();
        let Some(Ok((ticket, request))) = state.try_update(|history| history.begin_claim(&user_id, prediction_id)) else {
            return;
        };
        browser::spawn(async move {
            match api::claim_points(&request).await {
                Ok(reply) => {
                    if let Some(toast) = state.try_update(|history| history.claimed(ticket, &reply)).flatten() {
                        if let Some(total) = reply.total_point {
                            auth.try_update(|auth| auth.update_points(&LocalStore, total));
                        }
                        notify(ui, toast);
                    }
                }
                Err(err) => {
                    log::warn!("claim for prediction {prediction_id} failed: {err}");
                    state.try_update(|history| history.claim_failed(ticket, &err));
                }
            }
        });
    };

    let summary = move || {
        let stats = state.with(History::stats);
        format!(
            "{} predictions · {} correct · {}% accuracy",
            stats.total, stats.correct, stats.accuracy_percent
        )
    };

    let rows = move || {
        let (records, claiming) = state.with(|history| (history.records().to_vec(), history.claiming()));
        if records.is_empty() {
            return view! { <p class="stock__empty">"No predictions yet."</p> }.into_any();
        }
        view! {
            <ul class="stock__history">
                {records
                    .into_iter()
                    .map(|record| {
                        let result = match record.is_correct {
                            Some(true) => "✅ Correct",
                            Some(false) => "❌ Wrong",
                            None => "⏳ Pending",
                        };
                        let id = record.id;
                        let action = if is_claimable(&record) {
                            let busy = claiming == Some(id);
                            view! {
                                <button class="btn btn--primary" disabled=claiming.is_some() on:click=move |_| claim(id)>
                                    {if busy { "Claiming..." } else { "Claim reward" }}
                                </button>
                            }
                            .into_any()
                        } else if record.points_claimed {
                            view! { <span class="stock__claimed">"Claimed"</span> }.into_any()
                        } else {
                            ().into_any()
                        };
                        view! {
                            <li class="stock__record">
                                <span>{record.prediction_date}</span>
                                <span>{record.stock_code}</span>
                                <span>{record.predicted_trend.label()}</span>
                                <span>{record.actual_trend.map_or("-", Trend::label)}</span>
                                <span>{result}</span>
                                {record.reasoning.map(|text| view! { <span class="stock__why">{text}</span> })}
                                {action}
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        }
        .into_any()
    };

    view! {
        <section class="panel stock__history-panel">
            <LoadGate load=Signal::derive(move || state.with(|history| history.view().load().clone())) on_retry=Callback::new(move |()| load())>
                <p class="stock__summary">{summary}</p>
                {rows}
                <NoticeLine notice=Signal::derive(move || state.with(|history| history.view().notice().cloned()))/>
            </LoadGate>
            <p class="stock__hint">{format!("Each correct call is worth {}.", format::points(CORRECT_REWARD))}</p>
        </section>
    }
}
