//! Sign-up form with the live password checklist.

use leptos::prelude::*;
use leptos_router::components::A;
use panels::account::{self, MSG_SIGN_UP_DONE, PasswordRules};

use crate::config;
use crate::net::api;
use crate::util::browser;

fn rule_class(ok: bool) -> &'static str {
    if ok { "rule rule--ok" } else { "rule" }
}

#[component]
pub fn SignUpPage() -> impl IntoView {
    let username = RwSignal::new(String::new());
    let nickname = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let pending = RwSignal::new(false);

    let rules = Memo::new(move |_| PasswordRules::check(&password.get()));
    let hint = move || account::confirm_hint(&password.get(), &confirm.get());

    let submit = move || {
        if pending.get_untracked() {
            return;
        }
        let request = match account::validate_sign_up(
            &username.get_untracked(),
            &nickname.get_untracked(),
            &password.get_untracked(),
            &confirm.get_untracked(),
        ) {
            Ok(request) => request,
            Err(err) => {
                error.set(Some(err.to_string()));
                return;
            }
        };
        error.set(None);
        pending.set(true);
        browser::spawn(async move {
            match api::sign_up(&request).await {
                Ok(message) => {
                    log::info!("sign-up succeeded for {}", request.username);
                    let text = if message.is_empty() { MSG_SIGN_UP_DONE.to_owned() } else { message };
                    browser::alert(&text);
                    browser::redirect(config::app().login_path);
                }
                Err(err) => {
                    log::warn!("sign-up failed: {err}");
                    error.set(Some(err.user_message()));
                    pending.set(false);
                }
            }
        });
    };

    let field = move |label: &'static str, kind: &'static str, value: RwSignal<String>| {
        view! {
            <label class="auth-form__label">
                {label}
                <input type=kind prop:value=move || value.get() on:input=move |ev| value.set(event_target_value(&ev))/>
            </label>
        }
    };

    view! {
        <div class="auth-page">
            <h1>"Create an account"</h1>
            <form
                class="auth-form"
                on:submit=move |ev| {
                    ev.prevent_default();
                    submit();
                }
            >
                {field("Username", "text", username)}
                {field("Nickname", "text", nickname)}
                {field("Password", "password", password)}
                <ul class="auth-form__rules">
                    <li class=move || rule_class(rules.get().length)>"At least 8 characters"</li>
                    <li class=move || rule_class(rules.get().digit)>"A number"</li>
                    <li class=move || rule_class(rules.get().letter)>"A letter"</li>
                    <li class=move || rule_class(rules.get().special)>"A special character"</li>
                </ul>
                {field("Confirm password", "password", confirm)}
                {move || {
                    hint().map(|(ok, text)| view! { <p class=rule_class(ok)>{text}</p> })
                }}
                {move || error.get().map(|message| view! { <p class="auth-form__error">{message}</p> })}
                <button class="btn btn--primary" type="submit" disabled=move || pending.get()>
                    {move || if pending.get() { "Signing up..." } else { "Sign up" }}
                </button>
            </form>
            <p class="auth-page__switch">
                "Already have an account? "
                <A href=config::LOGIN_PATH>"Log in"</A>
            </p>
        </div>
    }
}
