//! My page: profile, attendance record, balance, trophies.

use leptos::prelude::*;
use panels::ApiError;
use panels::api::MyPage;
use panels::profile::{ProfileError, ProfileView};

use crate::net::api;
use crate::state::auth::AuthState;
use crate::util::auth::require_user;
use crate::util::storage::LocalStore;

fn to_view(result: Result<MyPage, ApiError>, user_id: &str) -> Result<ProfileView, String> {
    let page = result.map_err(|err| {
        log::warn!("mypage load failed: {err}");
        err.user_message()
    })?;
    ProfileView::from_page(&page, user_id).map_err(|err: ProfileError| {
        log::warn!("mypage returned an error shape: {err}");
        err.user_message().to_owned()
    })
}

#[component]
pub fn MyPagePage() -> impl IntoView {
    let Ok(identity) = require_user() else {
        return ().into_any();
    };
    let auth = expect_context::<RwSignal<AuthState>>();
    let user_id = StoredValue::new(identity.user_id);

    let profile = LocalResource::new(move || {
        let user_id = user_id.get_value();
        async move {
            let result = api::mypage(&user_id).await;
            if let Ok(page) = &result {
                if page.message.is_none() {
                    auth.try_update(|auth| auth.update_points(&LocalStore, page.total_point));
                }
            }
            to_view(result, &user_id)
        }
    });

    let row = |label: &'static str, value: String| {
        view! {
            <div class="profile__row">
                <dt>{label}</dt>
                <dd>{value}</dd>
            </div>
        }
    };

    let render = move |view: ProfileView| {
        let style = view.nickname_color.clone().map(|color| format!("color: {color}"));
        view! {
            <section class="panel profile">
                <h2 style=style>{view.nickname.clone()}</h2>
                <dl>
                    {row("ID", view.user_id)}
                    {row("Contact", view.contact)}
                    {row("Email", view.email)}
                </dl>
            </section>
            <section class="panel profile">
                <h2>"Attendance"</h2>
                <dl>
                    {row("Total days", view.attendance)}
                    {row("Current streak", view.continuous_attendance)}
                    {row("Last check-in", view.last_attendance_date)}
                </dl>
            </section>
            <section class="panel profile">
                <h2>"Points"</h2>
                <p class="profile__total">{view.total_point}</p>
                <p class="profile__delta">{format!("Today {}", view.daily_delta)}</p>
            </section>
            <section class="panel profile">
                <h2>"Trophies"</h2>
                {if view.trophies.is_empty() {
                    view! { <p>"No trophies yet."</p> }.into_any()
                } else {
                    view! { <ul>{view.trophies.into_iter().map(|name| view! { <li>{name}</li> }).collect_view()}</ul> }.into_any()
                }}
                <h2>"Indicators"</h2>
                {if view.indicators.is_empty() {
                    view! { <p>"No indicators purchased."</p> }.into_any()
                } else {
                    view! { <ul>{view.indicators.into_iter().map(|name| view! { <li>{name}</li> }).collect_view()}</ul> }.into_any()
                }}
            </section>
        }
    };

    view! {
        <div class="mypage">
            <h1>"My Page"</h1>
            <Suspense fallback=move || view! { <p>"Loading..."</p> }>
                {move || {
                    profile
                        .get()
                        .map(|result| match result {
                            Ok(view) => render(view).into_any(),
                            Err(message) => view! {
                                <div class="panel__error">
                                    <p>{message}</p>
                                    <button class="btn" on:click=move |_| profile.refetch()>"Retry"</button>
                                </div>
                            }
                            .into_any(),
                        })
                }}
            </Suspense>
        </div>
    }
    .into_any()
}
