//! Point store: catalog, purchase confirmation, random-box results.

use leptos::prelude::*;
use panels::format;
use panels::store::{BuyButton, Store};

use crate::components::load_gate::{LoadGate, NoticeLine};
use crate::components::toast::notify;
use crate::net::api;
use crate::state::auth::AuthState;
use crate::state::ui::UiState;
use crate::util::auth::require_user;
use crate::util::browser;
use crate::util::storage::LocalStore;

#[component]
pub fn StorePage() -> impl IntoView {
    let Ok(identity) = require_user() else {
        return ().into_any();
    };
    let auth = expect_context::<RwSignal<AuthState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let state = RwSignal::new(Store::default());
    let user_id = StoredValue::new(identity.user_id);

    let load = move || {
        let Some(ticket) = state.try_update(Store::begin_enter) else { return };
        let user_id = user_id.get_value();
        browser::spawn(async move {
            let result = api::mypage(&user_id).await;
            let cached = auth.with_untracked(AuthState::points);
            state.try_update(|store| match &result {
                Ok(page) => store.loaded(ticket, page, cached),
                Err(err) => store.failed(ticket, err, cached),
            });
        });
    };
    load();

    let purchase = move || {
        let user_id = user_id.get_value();
        let Some(Ok((ticket, request))) = state.try_update(|store| store.begin_purchase(&user_id)) else {
            return;
        };
        browser::spawn(async move {
            let toast = match api::purchase(&request).await {
                Ok(reply) => {
                    let toast = state.try_update(|store| store.purchased(ticket, reply)).flatten();
                    if reply.ok && toast.is_some() {
                        auth.try_update(|auth| auth.update_points(&LocalStore, reply.total_point));
                    }
                    toast
                }
                Err(err) => {
                    log::warn!("purchase of {} failed: {err}", request.item_code);
                    state.try_update(|store| store.purchase_failed(ticket, &err)).flatten()
                }
            };
            if let Some(toast) = toast {
                notify(ui, toast.notice());
            }
        });
    };

    let items = move || {
        state.with(|store| {
            store
                .catalog()
                .iter()
                .map(|item| {
                    let button = store.button(item);
                    let code = item.code;
                    view! {
                        <li class="store__item">
                            <h3>{item.name}</h3>
                            <p class="store__description">{item.description}</p>
                            <p class="store__price">{format::points(item.price)}</p>
                            <button
                                class="btn btn--primary"
                                disabled=button != BuyButton::Buy
                                on:click=move |_| {
                                    state.try_update(|store| store.select(code));
                                }
                            >
                                {button.label()}
                            </button>
                        </li>
                    }
                })
                .collect_view()
        })
    };

    let confirm = move || {
        state.with(|store| store.confirming()).map(|item| {
            let pending = move || state.with(|store| store.view().is_pending());
            view! {
                <div class="dialog-backdrop">
                    <div class="dialog" role="dialog">
                        <h2>"Confirm purchase"</h2>
                        <p>{format!("Buy {} for {}?", item.name, format::points(item.price))}</p>
                        <div class="dialog__actions">
                            <button class="btn btn--primary" disabled=pending on:click=move |_| purchase()>
                                {move || if pending() { "Purchasing..." } else { "Buy" }}
                            </button>
                            <button
                                class="btn"
                                disabled=pending
                                on:click=move |_| {
                                    state.try_update(Store::cancel);
                                }
                            >
                                "Cancel"
                            </button>
                        </div>
                        <NoticeLine notice=Signal::derive(move || state.with(|store| store.view().notice().cloned()))/>
                    </div>
                </div>
            }
        })
    };

    view! {
        <div class="store-page">
            <h1>"Point Store"</h1>
            <LoadGate load=Signal::derive(move || state.with(|store| store.view().load().clone())) on_retry=Callback::new(move |()| load())>
                <p class="store__balance">{move || format!("My points: {}", format::points(state.with(Store::points)))}</p>
                <ul class="store__items">{items}</ul>
                {confirm}
            </LoadGate>
        </div>
    }
    .into_any()
}
