//! Loading / failed / ready wrapper for a panel's initial fetch, and the
//! inline notice line.

use leptos::prelude::*;
use panels::{Load, Notice, Tone};

/// Renders `children` once `load` is `Ready`. A failed load shows the error
/// and a retry button wired to `on_retry`.
#[component]
pub fn LoadGate(#[prop(into)] load: Signal<Load>, on_retry: Callback<()>, children: ChildrenFn) -> impl IntoView {
    move || match load.get() {
        Load::Loading => view! { <p class="panel__loading">"Loading..."</p> }.into_any(),
        Load::Failed(message) => view! {
            <div class="panel__error">
                <p>{message}</p>
                <button class="btn" on:click=move |_| on_retry.run(())>"Retry"</button>
            </div>
        }
        .into_any(),
        Load::Ready => children().into_any(),
    }
}

/// Inline feedback line under a panel's controls.
#[component]
pub fn NoticeLine(#[prop(into)] notice: Signal<Option<Notice>>) -> impl IntoView {
    move || {
        notice.get().map(|notice| {
            let class = match notice.tone {
                Tone::Info => "notice notice--info",
                Tone::Success => "notice notice--success",
                Tone::Error => "notice notice--error",
            };
            view! { <p class=class>{notice.text}</p> }
        })
    }
}
