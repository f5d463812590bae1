//! Daily O/X quiz: pick a topic, read the preview, answer each question.

use leptos::prelude::*;
use panels::quiz::{Answer, MSG_ALREADY_DONE, MSG_PICK_TOPIC, Quiz, QuizPhase, Topic};
use panels::{Notice, SubmitRejected};

use crate::components::load_gate::{LoadGate, NoticeLine};
use crate::components::toast::notify;
use crate::net::api;
use crate::state::ui::UiState;
use crate::util::auth::require_user;
use crate::util::browser;

fn load(state: RwSignal<Quiz>, user_id: String) {
    let Some(ticket) = state.try_update(Quiz::begin_enter) else { return };
    browser::spawn(async move {
        let result = api::quiz_participation(&user_id).await;
        state.try_update(|quiz| match result {
            Ok(participation) => quiz.participation_loaded(ticket, participation),
            Err(err) => quiz.participation_failed(ticket, &err),
        });
    });
}

fn start_topic(state: RwSignal<Quiz>, ui: RwSignal<UiState>) {
    let (ticket, topic) = match state.try_update(Quiz::begin_topic) {
        Some(Ok(started)) => started,
        Some(Err(SubmitRejected::MissingInput)) => {
            notify(ui, Notice::info(MSG_PICK_TOPIC));
            return;
        }
        _ => return,
    };
    browser::spawn(async move {
        let result = api::quiz_by_topic(topic).await;
        state.try_update(|quiz| match result {
            Ok(items) => quiz.topic_loaded(ticket, items),
            Err(err) => {
                log::warn!("quiz topic {} failed to load: {err}", topic.wire_name());
                quiz.topic_failed(ticket, &err)
            }
        });
    });
}

fn answer(state: RwSignal<Quiz>, user_id: String, choice: Answer) {
    let Some(Ok((ticket, request))) = state.try_update(|quiz| quiz.begin_answer(&user_id, choice)) else {
        return;
    };
    browser::spawn(async move {
        match api::submit_answer(&request).await {
            Ok(reply) => {
                state.try_update(|quiz| quiz.answered(ticket, reply));
            }
            Err(err) => {
                log::warn!("quiz answer {} failed: {err}", request.quiz_index);
                state.try_update(|quiz| quiz.answer_failed(ticket, &err));
            }
        }
    });
}

#[component]
pub fn QuizPage() -> impl IntoView {
    let Ok(identity) = require_user() else {
        return ().into_any();
    };
    let ui = expect_context::<RwSignal<UiState>>();
    let state = RwSignal::new(Quiz::new());
    let user_id = StoredValue::new(identity.user_id);

    load(state, user_id.get_value());

    let enabled = move || state.with(|quiz| quiz.view().inputs_enabled());

    let topic_picker = move |selected: Option<Topic>| {
        view! {
            <div class="quiz__topics">
                {Topic::ALL
                    .into_iter()
                    .map(|topic| {
                        let class = if selected == Some(topic) { "quiz__topic quiz__topic--selected" } else { "quiz__topic" };
                        view! {
                            <button
                                class=class
                                disabled=move || state.with(|quiz| quiz.view().is_pending())
                                on:click=move |_| {
                                    state.try_update(|quiz| quiz.select_topic(topic));
                                }
                            >
                                <span class="quiz__topic-icon">{topic.icon()}</span>
                                <span>{topic.label()}</span>
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
            <button class="btn btn--primary" disabled=move || !enabled() on:click=move |_| start_topic(state, ui)>
                {move || if state.with(|quiz| quiz.view().is_pending()) { "Loading questions..." } else { "Start" }}
            </button>
        }
    };

    let preview = move || {
        let items = state.with(|quiz| quiz.session().map(|session| session.items.clone()).unwrap_or_default());
        view! {
            <p>"Read through today's study notes before you begin."</p>
            <ol class="quiz__preview">
                {items.into_iter().map(|item| view! { <li>{item.explanation}</li> }).collect_view()}
            </ol>
            <button
                class="btn btn--primary"
                on:click=move |_| {
                    state.try_update(Quiz::start_answering);
                }
            >
                "Start quiz"
            </button>
        }
    };

    let question = move |index: usize| {
        let text = state.with(|quiz| quiz.current_item().map(|item| item.question.clone()).unwrap_or_default());
        let count = state.with(Quiz::question_count);
        view! {
            <p class="quiz__progress">{format!("Question {} / {count}", index + 1)}</p>
            <p class="quiz__question">{text}</p>
            <div class="quiz__answers">
                <button class="btn quiz__answer" disabled=move || !enabled() on:click=move |_| answer(state, user_id.get_value(), Answer::O)>
                    "O"
                </button>
                <button class="btn quiz__answer" disabled=move || !enabled() on:click=move |_| answer(state, user_id.get_value(), Answer::X)>
                    "X"
                </button>
            </div>
        }
    };

    let feedback = move || {
        let (text, explanation, last) = state.with(|quiz| {
            (
                quiz.feedback_text().unwrap_or_default(),
                quiz.current_item().map(|item| item.explanation.clone()).unwrap_or_default(),
                quiz.is_last_question(),
            )
        });
        view! {
            <p class="quiz__feedback">{text}</p>
            <p class="quiz__explanation">{explanation}</p>
            <button
                class="btn btn--primary"
                on:click=move |_| {
                    state.try_update(Quiz::next_question);
                }
            >
                {if last { "See results" } else { "Next question" }}
            </button>
        }
    };

    let body = move || match state.with(|quiz| *quiz.view().phase()) {
        QuizPhase::SelectingTopic { topic } => topic_picker(topic).into_any(),
        QuizPhase::Previewing => preview().into_any(),
        QuizPhase::Answering { index } => question(index).into_any(),
        QuizPhase::Feedback { .. } => feedback().into_any(),
        QuizPhase::Finished => view! {
            <div class="quiz__finished">
                <h2>"Quiz complete!"</h2>
                <p>{move || format!("You earned {} points today.", state.with(Quiz::total_points))}</p>
            </div>
        }
        .into_any(),
        QuizPhase::AlreadyDone => view! { <p class="quiz__done">{MSG_ALREADY_DONE}</p> }.into_any(),
    };

    view! {
        <div class="quiz-page">
            <h1>"Daily Quiz"</h1>
            <LoadGate
                load=Signal::derive(move || state.with(|quiz| quiz.view().load().clone()))
                on_retry=Callback::new(move |()| load(state, user_id.get_value()))
            >
                {body}
                <NoticeLine notice=Signal::derive(move || state.with(|quiz| quiz.view().notice().cloned()))/>
            </LoadGate>
        </div>
    }
    .into_any()
}
