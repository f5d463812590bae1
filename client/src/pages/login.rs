//! Login form: validate, check credentials, fetch the display name, persist.

use leptos::prelude::*;
use leptos_router::components::A;
use panels::ApiError;
use panels::account::{self, MSG_LOGIN_FAILED};
use panels::api::Credentials;

use crate::config::{self, SIGN_UP_PATH};
use crate::net::api;
use crate::state::auth::AuthState;
use crate::util::browser;
use crate::util::storage::LocalStore;

/// Validation, then the display-name lookup. Returns the nickname, if the
/// backend has one.
async fn log_in(credentials: &Credentials) -> Result<Option<String>, String> {
    let validation = api::login_validation(credentials).await.map_err(|err| login_error(&err))?;
    if !validation.is_success() {
        return Err(MSG_LOGIN_FAILED.to_owned());
    }
    let name = api::login_name(credentials).await.map_err(|err| login_error(&err))?;
    Ok(name.user_name)
}

fn login_error(err: &ApiError) -> String {
    log::warn!("login failed: {err}");
    match err {
        ApiError::Rejected { .. } => MSG_LOGIN_FAILED.to_owned(),
        _ => err.user_message(),
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let pending = RwSignal::new(false);

    let submit = move || {
        if pending.get_untracked() {
            return;
        }
        let credentials = match account::validate_login(&username.get_untracked(), &password.get_untracked()) {
            Ok(credentials) => credentials,
            Err(err) => {
                error.set(Some(err.to_string()));
                return;
            }
        };
        error.set(None);
        pending.set(true);
        browser::spawn(async move {
            match log_in(&credentials).await {
                Ok(nickname) => {
                    auth.update(|auth| auth.sign_in(&LocalStore, &credentials.username, nickname.as_deref()));
                    browser::alert(&account::greeting(nickname.as_deref()));
                    browser::redirect(config::app().home_path);
                }
                Err(message) => {
                    error.set(Some(message));
                    pending.set(false);
                }
            }
        });
    };

    view! {
        <div class="auth-page">
            <h1>"Points Center"</h1>
            <form
                class="auth-form"
                on:submit=move |ev| {
                    ev.prevent_default();
                    submit();
                }
            >
                <label class="auth-form__label">
                    "Username"
                    <input
                        type="text"
                        autocomplete="username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                </label>
                <label class="auth-form__label">
                    "Password"
                    <input
                        type="password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                </label>
                {move || error.get().map(|message| view! { <p class="auth-form__error">{message}</p> })}
                <button class="btn btn--primary" type="submit" disabled=move || pending.get()>
                    {move || if pending.get() { "Logging in..." } else { "Log in" }}
                </button>
            </form>
            <p class="auth-page__switch">
                "No account yet? "
                <A href=SIGN_UP_PATH>"Sign up"</A>
            </p>
        </div>
    }
}
