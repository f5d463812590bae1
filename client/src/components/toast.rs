//! Transient notification slot.

use leptos::prelude::*;
use panels::{Notice, Tone};

use crate::state::ui::{TOAST_MS, UiState};
use crate::util::browser;

/// Show `notice` and schedule its dismissal.
pub fn notify(ui: RwSignal<UiState>, notice: Notice) {
    let Some(id) = ui.try_update(|state| state.show_toast(notice)) else {
        return;
    };
    browser::after(TOAST_MS, move || {
        ui.try_update(|state| state.dismiss_toast(id));
    });
}

fn tone_class(tone: Tone) -> &'static str {
    match tone {
        Tone::Info => "toast toast--info",
        Tone::Success => "toast toast--success",
        Tone::Error => "toast toast--error",
    }
}

#[component]
pub fn Toast() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();

    move || {
        ui.get().toast.map(|(id, notice)| {
            view! {
                <div class=tone_class(notice.tone) role="status" on:click=move |_| ui.update(|state| state.dismiss_toast(id))>
                    {notice.text.lines().map(|line| view! { <p>{line.to_owned()}</p> }).collect_view()}
                </div>
            }
        })
    }
}
